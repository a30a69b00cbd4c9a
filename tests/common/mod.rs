//! Shared utilities for integration tests.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use user_service::config::{DatabaseBackend, ServiceConfig};
use user_service::users::{ManagerSummary, NewUser, User, UserFlag};
use user_service::{HttpServer, Shutdown, StoreError, UserStore};

/// A running server plus the handle that stops it.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config used by every test server: memory backend, short timeouts.
pub fn test_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.database.backend = DatabaseBackend::Memory;
    config.timeouts.request_secs = 5;
    config.timeouts.query_secs = 2;
    config
}

/// Boot the real HTTP server on an ephemeral port over `store`.
pub async fn start_server(store: Arc<dyn UserStore>) -> TestServer {
    start_server_with(store, test_config()).await
}

/// Boot the real HTTP server with an explicit config.
pub async fn start_server_with(store: Arc<dyn UserStore>, config: ServiceConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config, store);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    TestServer {
        base_url: format!("http://{}", addr),
        client,
        shutdown,
    }
}

/// Insert payload with every field set.
#[allow(dead_code)]
pub fn user_payload(google_user_id: &str, first: &str, last: &str, is_manager: bool) -> Value {
    json!({
        "google_user_id": google_user_id,
        "first_name": first,
        "last_name": last,
        "email": format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        "is_admin": false,
        "is_active": true,
        "is_manager": is_manager,
        "manager_id": null,
    })
}

/// Cause string that must never reach a client.
#[allow(dead_code)]
pub const SECRET_CAUSE: &str = "Access denied for user 'svc'@'10.1.2.3' (using password: YES)";

/// A store whose every statement fails.
#[allow(dead_code)]
pub struct FailingStore;

#[async_trait]
impl UserStore for FailingStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Err(StoreError::Unavailable(SECRET_CAUSE.into()))
    }

    async fn list_managers(&self) -> Result<Vec<ManagerSummary>, StoreError> {
        Err(StoreError::Unavailable(SECRET_CAUSE.into()))
    }

    async fn find_by_google_id(&self, _google_user_id: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Unavailable(SECRET_CAUSE.into()))
    }

    async fn insert_user(&self, _user: &NewUser) -> Result<i64, StoreError> {
        Err(StoreError::Unavailable(SECRET_CAUSE.into()))
    }

    async fn set_flag(&self, _id: i64, _flag: UserFlag, _value: bool) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable(SECRET_CAUSE.into()))
    }

    async fn assign_manager(&self, _id: i64, _manager_id: Option<i64>) -> Result<u64, StoreError> {
        Err(StoreError::Unavailable(SECRET_CAUSE.into()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(SECRET_CAUSE.into()))
    }
}

/// A store that answers every statement only after `delay`.
#[allow(dead_code)]
pub struct SlowStore {
    pub delay: Duration,
}

#[allow(dead_code)]
impl SlowStore {
    async fn stall(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

#[async_trait]
impl UserStore for SlowStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.stall().await;
        Ok(Vec::new())
    }

    async fn list_managers(&self) -> Result<Vec<ManagerSummary>, StoreError> {
        self.stall().await;
        Ok(Vec::new())
    }

    async fn find_by_google_id(&self, _google_user_id: &str) -> Result<Option<User>, StoreError> {
        self.stall().await;
        Ok(None)
    }

    async fn insert_user(&self, _user: &NewUser) -> Result<i64, StoreError> {
        self.stall().await;
        Ok(1)
    }

    async fn set_flag(&self, _id: i64, _flag: UserFlag, _value: bool) -> Result<u64, StoreError> {
        self.stall().await;
        Ok(1)
    }

    async fn assign_manager(&self, _id: i64, _manager_id: Option<i64>) -> Result<u64, StoreError> {
        self.stall().await;
        Ok(1)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.stall().await;
        Ok(())
    }
}
