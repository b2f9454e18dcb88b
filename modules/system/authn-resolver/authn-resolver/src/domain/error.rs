//! Domain errors for the `AuthN` resolver.

use authn_resolver_sdk::{AuthNResolverError, IdentityProviderError, UserStoreError};

/// Internal domain errors.
///
/// Carries the precise cause for logging. Everything that happens during sign-in
/// is reported outward as [`AuthNResolverError::InvalidCredentials`].
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("email and password are required")]
    MissingCredentials,

    #[error("identity provider rejected the credentials")]
    InvalidCredentials,

    #[error("invalid federated assertion: {0}")]
    InvalidAssertion(String),

    #[error("unknown federated provider '{0}'")]
    UnknownProvider(String),

    #[error("no user record for '{0}'")]
    UserNotFound(String),

    #[error("user '{user_id}' has an invalid stored role: {reason}")]
    InvalidRoleRecord { user_id: String, reason: String },

    #[error("invalid session token: {0}")]
    InvalidToken(String),

    #[error("session token expired")]
    TokenExpired,

    #[error("failed to persist user record: {0}")]
    Persistence(String),

    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("user store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Whether the error is caused by the caller's input rather than by a fault
    /// in the resolver or its collaborators.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials
                | Self::InvalidCredentials
                | Self::InvalidAssertion(_)
                | Self::UnknownProvider(_)
                | Self::InvalidToken(_)
                | Self::TokenExpired
        )
    }
}

impl From<IdentityProviderError> for DomainError {
    fn from(e: IdentityProviderError) -> Self {
        match e {
            IdentityProviderError::InvalidCredentials => Self::InvalidCredentials,
            IdentityProviderError::InvalidAssertion(msg) => Self::InvalidAssertion(msg),
            IdentityProviderError::UnknownProvider(provider) => Self::UnknownProvider(provider),
            IdentityProviderError::Unavailable(msg) => Self::ProviderUnavailable(msg),
            IdentityProviderError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<UserStoreError> for DomainError {
    fn from(e: UserStoreError) -> Self {
        match e {
            UserStoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
            UserStoreError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<DomainError> for AuthNResolverError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MissingCredentials
            | DomainError::InvalidCredentials
            | DomainError::InvalidAssertion(_)
            | DomainError::UnknownProvider(_)
            | DomainError::UserNotFound(_)
            | DomainError::InvalidRoleRecord { .. } => Self::InvalidCredentials,
            DomainError::InvalidToken(msg) => Self::InvalidToken(msg),
            DomainError::TokenExpired => Self::Expired,
            DomainError::Persistence(msg) => Self::PersistenceFailure(msg),
            DomainError::ProviderUnavailable(msg) | DomainError::StoreUnavailable(msg) => {
                Self::ServiceUnavailable(msg)
            }
            DomainError::InvalidConfig(msg) | DomainError::Internal(msg) => Self::Internal(msg),
        }
    }
}
