//! Identity provider backed by configuration.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use authn_resolver_sdk::{
    FederatedAssertion, IdentityProviderClient, IdentityProviderError, ProviderUser,
};

use super::password::verify_password;
use crate::config::StaticAuthNPluginConfig;

/// Hash verified for unknown emails so that a miss costs the same Argon2 work
/// as a wrong password. Same parameters as `Argon2::default()`; the password
/// behind it was discarded.
const UNKNOWN_USER_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ELTMt4UcvhNmyOKC5/xHfw$uUXvlchjfZZIiRihn5zPj4PRMq9MR61325dRtVah4gM";

struct PasswordEntry {
    user: ProviderUser,
    password_hash: String,
}

/// Static identity provider.
///
/// Emails are matched case-insensitively. Federated assertions are looked up
/// verbatim per provider.
pub struct StaticIdentityProvider {
    by_email: HashMap<String, Arc<PasswordEntry>>,
    providers: HashSet<String>,
    assertions: HashMap<(String, String), ProviderUser>,
}

impl StaticIdentityProvider {
    /// Build the provider from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticAuthNPluginConfig) -> Self {
        let by_email = cfg
            .users
            .iter()
            .map(|u| {
                let entry = PasswordEntry {
                    user: ProviderUser {
                        uid: u.uid.clone(),
                        email: Some(u.email.clone()),
                        display_name: u.display_name.clone(),
                    },
                    password_hash: u.password_hash.clone(),
                };
                (u.email.to_lowercase(), Arc::new(entry))
            })
            .collect();

        let providers = cfg.federated.iter().map(|m| m.provider.clone()).collect();

        let assertions = cfg
            .federated
            .iter()
            .map(|m| {
                let user = ProviderUser {
                    uid: m.uid.clone(),
                    email: m.email.clone(),
                    display_name: m.display_name.clone(),
                };
                ((m.provider.clone(), m.assertion.clone()), user)
            })
            .collect();

        Self {
            by_email,
            providers,
            assertions,
        }
    }

    /// Hash to verify against and the user it belongs to. Unknown emails get
    /// the placeholder hash and no user.
    fn password_entry(&self, email: &str) -> (String, Option<ProviderUser>) {
        self.by_email.get(&email.trim().to_lowercase()).map_or_else(
            || (UNKNOWN_USER_HASH.to_owned(), None),
            |entry| (entry.password_hash.clone(), Some(entry.user.clone())),
        )
    }
}

#[async_trait]
impl IdentityProviderClient for StaticIdentityProvider {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderUser, IdentityProviderError> {
        let (hash, user) = self.password_entry(email);

        let password = password.to_owned();
        // Argon2 is deliberately slow; keep it off the async workers.
        let verified = tokio::task::spawn_blocking(move || verify_password(&hash, &password))
            .await
            .map_err(|e| {
                IdentityProviderError::Internal(format!("password check aborted: {e}"))
            })?;

        user.filter(|_| verified)
            .ok_or(IdentityProviderError::InvalidCredentials)
    }

    async fn verify_assertion(
        &self,
        assertion: &FederatedAssertion,
    ) -> Result<ProviderUser, IdentityProviderError> {
        if !self.providers.contains(&assertion.provider) {
            return Err(IdentityProviderError::UnknownProvider(
                assertion.provider.clone(),
            ));
        }

        self.assertions
            .get(&(assertion.provider.clone(), assertion.assertion.clone()))
            .cloned()
            .ok_or_else(|| {
                IdentityProviderError::InvalidAssertion(format!(
                    "assertion not recognized by '{}'",
                    assertion.provider
                ))
            })
    }
}
