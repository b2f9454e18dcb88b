pub mod error;
pub mod service;

pub use error::DomainError;
pub use service::AccountsService;
