use std::sync::Arc;

use authn_resolver_sdk::{
    AuthNResolverClient, AuthNResolverError, FederatedAssertion, SessionGrant, UserRecord,
    UserStoreClient,
};
use eventhost_security::{Role, SessionContext};
use tracing::info;

use super::error::DomainError;

/// Session and role administration on top of the `AuthN` resolver and the user
/// store.
pub struct AccountsService {
    authn: Arc<dyn AuthNResolverClient>,
    store: Arc<dyn UserStoreClient>,
}

impl AccountsService {
    pub fn new(authn: Arc<dyn AuthNResolverClient>, store: Arc<dyn UserStoreClient>) -> Self {
        Self { authn, store }
    }

    pub async fn sign_in_with_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionGrant, DomainError> {
        let grant = self.authn.sign_in(email, password).await?;
        info!(
            user_id = %grant.identity.id(),
            role = %grant.identity.role(),
            "signed in with credentials"
        );
        Ok(grant)
    }

    pub async fn sign_in_federated(
        &self,
        assertion: &FederatedAssertion,
    ) -> Result<SessionGrant, DomainError> {
        let grant = self.authn.sign_in_federated(assertion).await?;
        info!(
            user_id = %grant.identity.id(),
            role = %grant.identity.role(),
            provider = %assertion.provider,
            "signed in with federated provider"
        );
        Ok(grant)
    }

    /// Reissue the session token with the role currently stored for the user.
    pub async fn renew(&self, token: &str) -> Result<SessionGrant, DomainError> {
        self.authn.renew_session(token).await.map_err(|e| match e {
            AuthNResolverError::InvalidCredentials => DomainError::InvalidSession,
            other => other.into(),
        })
    }

    /// Assign `role` to `user_id`. Only admins may call this.
    pub async fn set_role(
        &self,
        caller: &SessionContext,
        user_id: &str,
        role: &str,
    ) -> Result<UserRecord, DomainError> {
        let Some(admin) = caller.identity().filter(|i| i.is_admin()) else {
            return Err(DomainError::Unauthorized);
        };

        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(DomainError::validation("userId", "must not be empty"));
        }
        let role: Role = role
            .parse()
            .map_err(|_| DomainError::InvalidRole(role.to_owned()))?;

        let record = self.store.set_role(user_id, role).await.map_err(|e| {
            tracing::error!(user_id, error = %e, "failed to set role");
            DomainError::from(e)
        })?;

        info!(admin_id = %admin.id(), user_id, role = %role, "role assigned");
        Ok(record)
    }
}
