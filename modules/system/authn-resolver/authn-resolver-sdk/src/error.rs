//! Error types for the `AuthN` resolver module and its collaborators.

use thiserror::Error;

/// Errors that can occur when using the `AuthN` resolver API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthNResolverError {
    /// Sign-in failed. Deliberately carries no detail.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The session token is malformed, tampered with or carries unknown claims.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The session token lifetime has elapsed.
    #[error("token expired")]
    Expired,

    /// A user record or role write failed.
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),

    /// A collaborator (identity provider, user store) is not reachable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors reported by an identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityProviderError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid assertion: {0}")]
    InvalidAssertion(String),

    #[error("unknown federated provider '{0}'")]
    UnknownProvider(String),

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("identity provider error: {0}")]
    Internal(String),
}

/// Errors reported by the user document store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    #[error("user store unavailable: {0}")]
    Unavailable(String),

    #[error("user store error: {0}")]
    Internal(String),
}
