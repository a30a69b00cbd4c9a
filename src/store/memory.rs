//! In-process store with the same contract as the MySQL one.
//!
//! Ids are assigned from 1 upwards; listings come back in insertion order.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{StoreError, UserStore};
use crate::users::{ManagerSummary, NewUser, User, UserFlag};

#[derive(Default)]
struct Table {
    rows: Vec<User>,
    next_id: i64,
}

/// A `users` table held in memory.
#[derive(Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn list_managers(&self) -> Result<Vec<ManagerSummary>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|u| u.is_manager)
            .map(ManagerSummary::from_user)
            .collect())
    }

    async fn find_by_google_id(&self, google_user_id: &str) -> Result<Option<User>, StoreError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .find(|u| u.google_user_id == google_user_id)
            .cloned())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<i64, StoreError> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let id = table.next_id;
        table.rows.push(user.clone().into_user(id));
        Ok(id)
    }

    async fn set_flag(&self, id: i64, flag: UserFlag, value: bool) -> Result<u64, StoreError> {
        let mut table = self.table.write().await;
        match table.rows.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                flag.apply(user, value);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn assign_manager(&self, id: i64, manager_id: Option<i64>) -> Result<u64, StoreError> {
        let mut table = self.table.write().await;
        match table.rows.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.manager_id = manager_id;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
