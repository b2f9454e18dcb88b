//! In-memory user store.

use async_trait::async_trait;
use authn_resolver_sdk::{UserRecord, UserStoreClient, UserStoreError};
use chrono::Utc;
use dashmap::DashMap;
use eventhost_security::Role;

/// User records keyed by user id.
///
/// Merges go through the map's entry API, so concurrent first logins for one id
/// observe a single stored record.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: DashMap<String, UserRecord>,
}

impl InMemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record unconditionally.
    pub fn seed(&self, record: UserRecord) {
        self.users.insert(record.id.clone(), record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStoreClient for InMemoryUserStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, UserStoreError> {
        Ok(self.users.get(user_id).map(|r| r.value().clone()))
    }

    async fn merge_user(&self, record: UserRecord) -> Result<UserRecord, UserStoreError> {
        let stored = self.users.entry(record.id.clone()).or_insert(record);
        Ok(stored.value().clone())
    }

    async fn set_role(&self, user_id: &str, role: Role) -> Result<UserRecord, UserStoreError> {
        let stored = self
            .users
            .entry(user_id.to_owned())
            .and_modify(|r| r.role = Some(role.as_str().to_owned()))
            .or_insert_with(|| UserRecord {
                id: user_id.to_owned(),
                email: None,
                display_name: None,
                role: Some(role.as_str().to_owned()),
                created_at: Utc::now(),
            });
        Ok(stored.value().clone())
    }
}
