//! User document store trait.

use async_trait::async_trait;
use eventhost_security::Role;

use crate::error::UserStoreError;
use crate::models::UserRecord;

/// Document store keyed by user id.
#[async_trait]
pub trait UserStoreClient: Send + Sync {
    /// Load a user record. `Ok(None)` when no record exists.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Internal` on store failure
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, UserStoreError>;

    /// Insert `record` unless a record with the same id already exists, and return
    /// the record that is stored afterwards.
    ///
    /// Concurrent merges for one id converge on a single stored record.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Internal` on store failure
    async fn merge_user(&self, record: UserRecord) -> Result<UserRecord, UserStoreError>;

    /// Set the role of a user, creating a minimal record if none exists.
    ///
    /// # Errors
    ///
    /// - `Unavailable` / `Internal` on store failure
    async fn set_role(&self, user_id: &str, role: Role) -> Result<UserRecord, UserStoreError>;
}
