#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("duplicate event id '{0}'")]
    DuplicateEvent(String),

    #[error("duplicate guest id '{guest_id}' in event '{event_id}'")]
    DuplicateGuest { event_id: String, guest_id: String },

    #[error("validation error on field '{field}': {message}")]
    Validation { field: String, message: String },
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
