//! `AuthN` resolver service.

use std::sync::Arc;

use authn_resolver_sdk::{
    FederatedAssertion, IdentityProviderClient, ProviderUser, SessionGrant, SignedToken,
    UserRecord, UserStoreClient,
};
use chrono::Utc;
use eventhost_security::{Identity, Role};
use tracing::{debug, info, warn};

use super::{DomainError, TokenCodec};
use crate::config::AuthNResolverConfig;

/// `AuthN` resolver service.
///
/// Holds the identity provider and user store it delegates to, plus the token
/// codec. Stateless across requests.
pub struct Service {
    provider: Arc<dyn IdentityProviderClient>,
    store: Arc<dyn UserStoreClient>,
    codec: TokenCodec,
    baseline_role: Role,
    fail_on_persist_error: bool,
}

impl Service {
    /// Create a service from its collaborators and configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the token settings are invalid.
    pub fn new(
        provider: Arc<dyn IdentityProviderClient>,
        store: Arc<dyn UserStoreClient>,
        cfg: &AuthNResolverConfig,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            provider,
            store,
            codec: TokenCodec::new(&cfg.token)?,
            baseline_role: cfg.baseline_role,
            fail_on_persist_error: cfg.first_login.fail_on_persist_error,
        })
    }

    /// Verify an email/password pair and resolve the stored role.
    ///
    /// # Errors
    ///
    /// `MissingCredentials`, provider errors, `UserNotFound` or
    /// `InvalidRoleRecord`.
    #[tracing::instrument(skip_all, fields(user_id))]
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, DomainError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::MissingCredentials);
        }

        let user = self.provider.sign_in_with_password(email, password).await?;
        tracing::Span::current().record("user_id", user.uid.as_str());

        let record = self
            .store
            .get_user(&user.uid)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(user.uid.clone()))?;
        let role = self.resolve_role(&record)?;

        debug!(role = %role, "credentials verified");
        Ok(identity_for(&user, Some(&record), role))
    }

    /// Verify a federated assertion, creating the user record on first login.
    ///
    /// # Errors
    ///
    /// `MissingCredentials`, provider errors, `InvalidRoleRecord`, or
    /// `Persistence` when the first-login record cannot be written in strict mode.
    #[tracing::instrument(skip_all, fields(provider = %assertion.provider, user_id))]
    pub async fn federated_sign_in(
        &self,
        assertion: &FederatedAssertion,
    ) -> Result<Identity, DomainError> {
        if assertion.provider.trim().is_empty() || assertion.assertion.is_empty() {
            return Err(DomainError::MissingCredentials);
        }

        let user = self.provider.verify_assertion(assertion).await?;
        tracing::Span::current().record("user_id", user.uid.as_str());

        let (record, role) = match self.store.get_user(&user.uid).await? {
            Some(record) => {
                let role = self.resolve_role(&record)?;
                (Some(record), role)
            }
            None => self.first_login(&user).await?,
        };

        debug!(role = %role, "federated assertion verified");
        Ok(identity_for(&user, record.as_ref(), role))
    }

    async fn first_login(
        &self,
        user: &ProviderUser,
    ) -> Result<(Option<UserRecord>, Role), DomainError> {
        let record = UserRecord::first_login(user, self.baseline_role, Utc::now());

        match self.store.merge_user(record).await {
            Ok(stored) => {
                let role = self.resolve_role(&stored)?;
                info!(user_id = %stored.id, role = %role, "user record created on first login");
                Ok((Some(stored), role))
            }
            Err(e) if self.fail_on_persist_error => Err(DomainError::Persistence(e.to_string())),
            Err(e) => {
                warn!(
                    user_id = %user.uid,
                    error = %e,
                    role = %self.baseline_role,
                    "failed to persist first-login record; continuing with baseline role"
                );
                Ok((None, self.baseline_role))
            }
        }
    }

    fn resolve_role(&self, record: &UserRecord) -> Result<Role, DomainError> {
        match record.parsed_role() {
            None => Ok(self.baseline_role),
            Some(Ok(role)) => Ok(role),
            Some(Err(e)) => Err(DomainError::InvalidRoleRecord {
                user_id: record.id.clone(),
                reason: e.to_string(),
            }),
        }
    }

    /// Issue a session token for `identity`.
    ///
    /// # Errors
    ///
    /// `Internal` if signing fails.
    pub fn issue_token(&self, identity: &Identity) -> Result<SignedToken, DomainError> {
        self.codec.issue(identity)
    }

    /// Verify a session token. No I/O.
    ///
    /// # Errors
    ///
    /// `InvalidToken` or `TokenExpired`.
    pub fn refresh_session(&self, token: &str) -> Result<Identity, DomainError> {
        self.codec.verify(token)
    }

    /// Verify a session token, re-read the persisted role and reissue.
    ///
    /// # Errors
    ///
    /// Token errors, `UserNotFound`, `InvalidRoleRecord` or store errors.
    #[tracing::instrument(skip_all, fields(user_id))]
    pub async fn renew_session(&self, token: &str) -> Result<SessionGrant, DomainError> {
        let current = self.codec.verify(token)?;
        tracing::Span::current().record("user_id", current.id());

        let record = self
            .store
            .get_user(current.id())
            .await?
            .ok_or_else(|| DomainError::UserNotFound(current.id().to_owned()))?;
        let role = self.resolve_role(&record)?;
        if role != current.role() {
            info!(from = %current.role(), to = %role, "role changed since last token");
        }

        let identity = Identity::builder()
            .id(current.id())
            .email(
                current
                    .email()
                    .map(ToOwned::to_owned)
                    .or_else(|| record.email.clone()),
            )
            .display_name(
                current
                    .display_name()
                    .map(ToOwned::to_owned)
                    .or_else(|| record.display_name.clone()),
            )
            .role(role)
            .build();
        let token = self.codec.issue(&identity)?;

        Ok(SessionGrant { identity, token })
    }
}

/// Provider-reported profile wins; the stored record fills the gaps.
fn identity_for(user: &ProviderUser, record: Option<&UserRecord>, role: Role) -> Identity {
    Identity::builder()
        .id(user.uid.as_str())
        .email(
            user.email
                .clone()
                .or_else(|| record.and_then(|r| r.email.clone())),
        )
        .display_name(
            user.display_name
                .clone()
                .or_else(|| record.and_then(|r| r.display_name.clone())),
        )
        .role(role)
        .build()
}
