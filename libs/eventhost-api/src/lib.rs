#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Shared HTTP plumbing for EventHost modules.
//!
//! - [`Problem`] - RFC 9457 problem details used for every error response
//! - [`session`] - session token transport (bearer header and cookie)

pub mod problem;
pub mod session;

pub use problem::{ApiResult, Problem};
pub use session::SessionCookieConfig;
