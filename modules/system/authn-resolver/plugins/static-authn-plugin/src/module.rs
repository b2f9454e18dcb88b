//! Static `AuthN` plugin wiring.

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::bail;
use authn_resolver_sdk::{IdentityProviderClient, UserRecord, UserStoreClient};
use chrono::Utc;
use tracing::{info, warn};

use crate::config::StaticAuthNPluginConfig;
use crate::domain::password::is_valid_hash;
use crate::domain::{InMemoryUserStore, StaticIdentityProvider};

/// Static identity provider plus the in-memory user store it seeds.
pub struct StaticAuthNPlugin {
    provider: Arc<StaticIdentityProvider>,
    store: Arc<InMemoryUserStore>,
}

impl StaticAuthNPlugin {
    /// Validate the configuration, build the provider and seed the store.
    ///
    /// # Errors
    ///
    /// Fails on duplicate emails or uids, and on password hashes that are not
    /// PHC strings.
    pub fn from_config(cfg: &StaticAuthNPluginConfig) -> anyhow::Result<Self> {
        let mut emails = HashSet::new();
        let mut uids = HashSet::new();
        for user in &cfg.users {
            if user.uid.trim().is_empty() || user.email.trim().is_empty() {
                bail!("static_authn: users need a non-empty uid and email");
            }
            if !emails.insert(user.email.to_lowercase()) {
                bail!("static_authn: duplicate user email '{}'", user.email);
            }
            if !uids.insert(user.uid.as_str()) {
                bail!("static_authn: duplicate user uid '{}'", user.uid);
            }
            if !is_valid_hash(&user.password_hash) {
                bail!(
                    "static_authn: password_hash of '{}' is not a PHC string (use `hash-password`)",
                    user.email
                );
            }
        }

        if !cfg.users.is_empty() || !cfg.federated.is_empty() {
            warn!(
                "Static AuthN plugin is serving credentials from configuration. \
                 Do NOT use it in production."
            );
        }

        let store = InMemoryUserStore::new();
        let now = Utc::now();
        for user in &cfg.users {
            store.seed(UserRecord {
                id: user.uid.clone(),
                email: Some(user.email.clone()),
                display_name: user.display_name.clone(),
                role: user.role.map(|r| r.as_str().to_owned()),
                created_at: now,
            });
        }

        info!(
            users = cfg.users.len(),
            federated = cfg.federated.len(),
            "Static authn plugin initialized"
        );

        Ok(Self {
            provider: Arc::new(StaticIdentityProvider::from_config(cfg)),
            store: Arc::new(store),
        })
    }

    #[must_use]
    pub fn identity_provider(&self) -> Arc<dyn IdentityProviderClient> {
        self.provider.clone()
    }

    #[must_use]
    pub fn user_store(&self) -> Arc<dyn UserStoreClient> {
        self.store.clone()
    }
}
