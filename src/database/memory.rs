//! In-memory credential store.
//!
//! Same contract as the Postgres store, including the uniqueness rule, but
//! nothing survives a restart. Used by tests and for local runs without a
//! database.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::database::models::User;
use crate::database::store::CredentialStore;
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: DashMap<String, User>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(username).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        // The entry lock makes check-and-insert atomic, like the UNIQUE column.
        match self.users.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
