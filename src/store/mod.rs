//! Record store subsystem.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → UserStore (trait object held in AppState)
//!     → deadline.rs (bounds each statement by timeouts.query_secs)
//!     → mysql.rs (one parameterized statement on the pool)
//!       or memory.rs (same contract, in-process)
//! ```
//!
//! # Design Decisions
//! - One trait method per route, one statement per method
//! - Updates report matched rows; callers decide whether zero matters
//! - The pool is created once at startup and shared for process lifetime

pub mod deadline;
pub mod memory;
pub mod mysql;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::users::{ManagerSummary, NewUser, User, UserFlag};

pub use deadline::DeadlineStore;
pub use memory::MemoryStore;
pub use mysql::MySqlStore;

/// Errors surfaced by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database driver rejected the statement or lost the connection.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store cannot serve requests at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The statement did not finish within the configured deadline.
    #[error("statement timed out after {0:?}")]
    Timeout(Duration),
}

/// Query contract every record store implements.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// `SELECT` every row, in storage order.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Rows with `is_manager` set, projected to `{id, name}`.
    async fn list_managers(&self) -> Result<Vec<ManagerSummary>, StoreError>;

    /// First row whose `google_user_id` matches.
    async fn find_by_google_id(&self, google_user_id: &str) -> Result<Option<User>, StoreError>;

    /// Insert a row and return the generated surrogate key.
    async fn insert_user(&self, user: &NewUser) -> Result<i64, StoreError>;

    /// Set one boolean column. Returns the number of rows matched by `id`,
    /// whether or not the stored value changed.
    async fn set_flag(&self, id: i64, flag: UserFlag, value: bool) -> Result<u64, StoreError>;

    /// Set or clear `manager_id`. Returns the number of rows matched by `id`.
    async fn assign_manager(&self, id: i64, manager_id: Option<i64>) -> Result<u64, StoreError>;

    /// One round trip to check the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Build the store selected by configuration.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn UserStore>, StoreError> {
    match config.backend {
        DatabaseBackend::MySql => {
            let store = MySqlStore::connect(config).await?;
            Ok(Arc::new(store))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
