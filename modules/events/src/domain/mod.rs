pub mod error;
pub mod model;
pub mod service;

pub use error::DomainError;
pub use model::{Attendance, Event, Guest};
pub use service::EventsService;
