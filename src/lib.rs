//! User directory HTTP service library.
//!
//! Eight `/api` routes over a single `users` table, each mapped to one
//! parameterized statement against a shared connection pool.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;
pub mod users;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{MemoryStore, MySqlStore, StoreError, UserStore};
