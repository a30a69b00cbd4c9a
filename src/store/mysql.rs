//! MySQL-backed store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};

use crate::config::DatabaseConfig;
use crate::store::{StoreError, UserStore};
use crate::users::{ManagerSummary, NewUser, User, UserFlag};

const SELECT_USERS: &str = "SELECT id, google_user_id, first_name, last_name, email, \
     is_admin, is_active, is_manager, manager_id FROM users";

const SELECT_USER_BY_GOOGLE_ID: &str = "SELECT id, google_user_id, first_name, last_name, email, \
     is_admin, is_active, is_manager, manager_id FROM users WHERE google_user_id = ? LIMIT 1";

const SELECT_MANAGERS: &str =
    "SELECT id, CONCAT(first_name, ' ', last_name) AS name FROM users WHERE is_manager = TRUE";

const INSERT_USER: &str = "INSERT INTO users \
     (google_user_id, first_name, last_name, email, is_admin, is_active, is_manager, manager_id) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?)";

const ASSIGN_MANAGER: &str = "UPDATE users SET manager_id = ? WHERE id = ?";

/// Store backed by a bounded `sqlx` MySQL pool.
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Create the pool from configuration.
    ///
    /// With `connect_lazily` no connection is opened until the first query.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.name);

        let pool_options = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs));

        let pool = if config.connect_lazily {
            pool_options.connect_lazy_with(options)
        } else {
            pool_options.connect_with(options).await?
        };

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            max_connections = config.max_connections,
            lazy = config.connect_lazily,
            "MySQL pool created"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for MySqlStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, User>(SELECT_USERS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_managers(&self) -> Result<Vec<ManagerSummary>, StoreError> {
        let rows = sqlx::query_as::<_, ManagerSummary>(SELECT_MANAGERS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_google_id(&self, google_user_id: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(SELECT_USER_BY_GOOGLE_ID)
            .bind(google_user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<i64, StoreError> {
        let result = sqlx::query(INSERT_USER)
            .bind(&user.google_user_id)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(user.is_admin)
            .bind(user.is_active)
            .bind(user.is_manager)
            .bind(user.manager_id)
            .execute(&self.pool)
            .await?;

        i64::try_from(result.last_insert_id())
            .map_err(|_| StoreError::Unavailable("generated id out of range".into()))
    }

    // sqlx connects with CLIENT_FOUND_ROWS, so `rows_affected` counts matched
    // rows even when the value is unchanged.
    async fn set_flag(&self, id: i64, flag: UserFlag, value: bool) -> Result<u64, StoreError> {
        let result = sqlx::query(flag.update_statement())
            .bind(value)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn assign_manager(&self, id: i64, manager_id: Option<i64>) -> Result<u64, StoreError> {
        let result = sqlx::query(ASSIGN_MANAGER)
            .bind(manager_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
