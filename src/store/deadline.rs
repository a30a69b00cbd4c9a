//! Per-statement deadline.
//!
//! Wraps any `UserStore` so a statement that outlives `timeouts.query_secs`
//! fails with `StoreError::Timeout`. The deadline is shorter than the
//! whole-request timeout, so a hung query surfaces as the route's storage
//! error instead of a bare request timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{StoreError, UserStore};
use crate::users::{ManagerSummary, NewUser, User, UserFlag};

/// A store whose every statement is bounded by `limit`.
pub struct DeadlineStore {
    inner: Arc<dyn UserStore>,
    limit: Duration,
}

impl DeadlineStore {
    pub fn new(inner: Arc<dyn UserStore>, limit: Duration) -> Self {
        Self { inner, limit }
    }

    async fn within<T, F>(&self, operation: &'static str, statement: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>> + Send,
    {
        match tokio::time::timeout(self.limit, statement).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, limit_secs = self.limit.as_secs_f64(), "Statement timed out");
                Err(StoreError::Timeout(self.limit))
            }
        }
    }
}

#[async_trait]
impl UserStore for DeadlineStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.within("list_users", self.inner.list_users()).await
    }

    async fn list_managers(&self) -> Result<Vec<ManagerSummary>, StoreError> {
        self.within("list_managers", self.inner.list_managers()).await
    }

    async fn find_by_google_id(&self, google_user_id: &str) -> Result<Option<User>, StoreError> {
        self.within("find_by_google_id", self.inner.find_by_google_id(google_user_id))
            .await
    }

    async fn insert_user(&self, user: &NewUser) -> Result<i64, StoreError> {
        self.within("insert_user", self.inner.insert_user(user)).await
    }

    async fn set_flag(&self, id: i64, flag: UserFlag, value: bool) -> Result<u64, StoreError> {
        self.within("set_flag", self.inner.set_flag(id, flag, value)).await
    }

    async fn assign_manager(&self, id: i64, manager_id: Option<i64>) -> Result<u64, StoreError> {
        self.within("assign_manager", self.inner.assign_manager(id, manager_id))
            .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.within("ping", self.inner.ping()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    struct StalledStore;

    #[async_trait]
    impl UserStore for StalledStore {
        async fn list_users(&self) -> Result<Vec<User>, StoreError> {
            std::future::pending().await
        }

        async fn list_managers(&self) -> Result<Vec<ManagerSummary>, StoreError> {
            std::future::pending().await
        }

        async fn find_by_google_id(&self, _: &str) -> Result<Option<User>, StoreError> {
            std::future::pending().await
        }

        async fn insert_user(&self, _: &NewUser) -> Result<i64, StoreError> {
            std::future::pending().await
        }

        async fn set_flag(&self, _: i64, _: UserFlag, _: bool) -> Result<u64, StoreError> {
            std::future::pending().await
        }

        async fn assign_manager(&self, _: i64, _: Option<i64>) -> Result<u64, StoreError> {
            std::future::pending().await
        }

        async fn ping(&self) -> Result<(), StoreError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_stalled_statement_times_out() {
        let store = DeadlineStore::new(Arc::new(StalledStore), Duration::from_millis(50));

        let err = store.list_users().await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(limit) if limit == Duration::from_millis(50)));

        let err = store.set_flag(1, UserFlag::Admin, true).await.unwrap_err();
        assert!(matches!(err, StoreError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_fast_statement_passes_through() {
        let store = DeadlineStore::new(Arc::new(MemoryStore::new()), Duration::from_secs(1));
        assert!(store.list_users().await.unwrap().is_empty());
        assert_eq!(store.assign_manager(9, None).await.unwrap(), 0);
    }
}
