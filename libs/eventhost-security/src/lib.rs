#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod context;
pub mod identity;
pub mod role;

pub use context::SessionContext;
pub use identity::{Identity, IdentityBuilder};
pub use role::{Role, RoleParseError};
