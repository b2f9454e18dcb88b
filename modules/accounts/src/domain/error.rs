use authn_resolver_sdk::{AuthNResolverError, UserStoreError};

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("session is missing, invalid or expired")]
    InvalidSession,

    #[error("caller is not allowed to perform this action")]
    Unauthorized,

    #[error("invalid role '{0}'")]
    InvalidRole(String),

    #[error("validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("persistence failure: {0}")]
    Persistence(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<AuthNResolverError> for DomainError {
    fn from(e: AuthNResolverError) -> Self {
        match e {
            AuthNResolverError::InvalidCredentials => Self::InvalidCredentials,
            AuthNResolverError::InvalidToken(_) | AuthNResolverError::Expired => {
                Self::InvalidSession
            }
            AuthNResolverError::ServiceUnavailable(msg) => Self::ServiceUnavailable(msg),
            AuthNResolverError::PersistenceFailure(msg) => Self::Persistence(msg),
            AuthNResolverError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<UserStoreError> for DomainError {
    fn from(e: UserStoreError) -> Self {
        Self::Persistence(e.to_string())
    }
}
