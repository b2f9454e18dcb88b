//! Public API trait for the `AuthN` resolver.
//!
//! This trait defines the interface that consumers use to sign users in and to
//! resolve the identity carried by a session token. The resolver implements
//! this trait and delegates to the configured identity provider and user store.

use async_trait::async_trait;
use eventhost_security::Identity;

use crate::error::AuthNResolverError;
use crate::models::{FederatedAssertion, SessionGrant, SignedToken};

/// Public API trait for the `AuthN` resolver.
///
/// Consumed by the API gateway (token verification on every request) and by the
/// accounts module (sign-in and session endpoints):
///
/// ```ignore
/// let grant = authn.sign_in(email, password).await?;
/// let identity = authn.refresh_session(&grant.token.token).await?;
/// ```
///
/// # Security
///
/// Sign-in failures are reported as a single [`AuthNResolverError::InvalidCredentials`]
/// no matter what went wrong internally, so callers cannot tell a wrong password
/// from an unknown account.
#[async_trait]
pub trait AuthNResolverClient: Send + Sync {
    /// Verify an email/password pair and resolve the stored role.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` for any verification failure, including a missing
    ///   user record for otherwise valid credentials
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthNResolverError>;

    /// Verify a federated-login assertion, defaulting a first-time user to the
    /// baseline role.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` for any verification failure
    async fn federated_sign_in(
        &self,
        assertion: &FederatedAssertion,
    ) -> Result<Identity, AuthNResolverError>;

    /// Encode an identity into a signed, time-bounded session token.
    ///
    /// # Errors
    ///
    /// - `Internal` if the token cannot be signed
    async fn issue_token(&self, identity: &Identity) -> Result<SignedToken, AuthNResolverError>;

    /// Decode and verify a session token. Performs no I/O.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` if the signature, issuer or claims are invalid
    /// - `Expired` if the token lifetime has elapsed
    async fn refresh_session(&self, token: &str) -> Result<Identity, AuthNResolverError>;

    /// Verify a session token, re-read the persisted role and reissue the token.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` / `Expired` as for [`Self::refresh_session`]
    /// - `InvalidCredentials` if the user record no longer exists
    /// - `ServiceUnavailable` if the user store cannot be reached
    async fn renew_session(&self, token: &str) -> Result<SessionGrant, AuthNResolverError>;

    /// Verify credentials and issue a session token in one step.
    ///
    /// # Errors
    ///
    /// Same as [`Self::verify_credentials`] and [`Self::issue_token`].
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionGrant, AuthNResolverError> {
        let identity = self.verify_credentials(email, password).await?;
        let token = self.issue_token(&identity).await?;
        Ok(SessionGrant { identity, token })
    }

    /// Verify a federated assertion and issue a session token in one step.
    ///
    /// # Errors
    ///
    /// Same as [`Self::federated_sign_in`] and [`Self::issue_token`].
    async fn sign_in_federated(
        &self,
        assertion: &FederatedAssertion,
    ) -> Result<SessionGrant, AuthNResolverError> {
        let identity = self.federated_sign_in(assertion).await?;
        let token = self.issue_token(&identity).await?;
        Ok(SessionGrant { identity, token })
    }
}
