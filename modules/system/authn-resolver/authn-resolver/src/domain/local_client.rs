//! Local (in-process) client for the `AuthN` resolver.

use std::sync::Arc;

use async_trait::async_trait;
use authn_resolver_sdk::{
    AuthNResolverClient, AuthNResolverError, FederatedAssertion, SessionGrant, SignedToken,
};
use eventhost_security::Identity;

use super::{DomainError, Service};

/// Local client wrapping the service.
///
/// Built by [`crate::build_client`] and shared with the gateway and the accounts
/// module.
pub struct AuthNResolverLocalClient {
    svc: Arc<Service>,
}

impl AuthNResolverLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AuthNResolverError {
    if e.is_rejection() {
        tracing::debug!(operation = op, error = %e, "authn_resolver call rejected");
    } else {
        tracing::error!(operation = op, error = ?e, "authn_resolver call failed");
    }
    e.into()
}

/// Sign-in failures never reveal their cause to the caller.
fn sign_in_failure(op: &str, e: &DomainError) -> AuthNResolverError {
    if e.is_rejection() {
        tracing::info!(operation = op, error = %e, "sign-in rejected");
    } else {
        tracing::error!(operation = op, error = ?e, "sign-in failed");
    }
    AuthNResolverError::InvalidCredentials
}

#[async_trait]
impl AuthNResolverClient for AuthNResolverLocalClient {
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthNResolverError> {
        self.svc
            .verify_credentials(email, password)
            .await
            .map_err(|e| sign_in_failure("verify_credentials", &e))
    }

    async fn federated_sign_in(
        &self,
        assertion: &FederatedAssertion,
    ) -> Result<Identity, AuthNResolverError> {
        self.svc
            .federated_sign_in(assertion)
            .await
            .map_err(|e| sign_in_failure("federated_sign_in", &e))
    }

    async fn issue_token(&self, identity: &Identity) -> Result<SignedToken, AuthNResolverError> {
        self.svc
            .issue_token(identity)
            .map_err(|e| log_and_convert("issue_token", e))
    }

    async fn refresh_session(&self, token: &str) -> Result<Identity, AuthNResolverError> {
        self.svc
            .refresh_session(token)
            .map_err(|e| log_and_convert("refresh_session", e))
    }

    async fn renew_session(&self, token: &str) -> Result<SessionGrant, AuthNResolverError> {
        self.svc
            .renew_session(token)
            .await
            .map_err(|e| log_and_convert("renew_session", e))
    }
}
