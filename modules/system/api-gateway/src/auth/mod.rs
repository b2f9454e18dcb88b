//! Role-based route authorization.

pub mod middleware;
pub mod pattern;
pub mod policy;

pub use middleware::{AuthState, authz_middleware};
pub use pattern::{PatternError, RoutePattern};
pub use policy::{AccessDecision, AccessPolicy, PolicyError, RouteClass, is_api_path};
