//! `AuthN` Resolver SDK
//!
//! This crate provides the public API for the `authn_resolver` module:
//!
//! - [`AuthNResolverClient`] - Public API trait for consumers
//! - [`IdentityProviderClient`] - Identity provider the resolver delegates to
//! - [`UserStoreClient`] - Document store holding user records and roles
//! - [`SessionGrant`], [`SignedToken`], [`UserRecord`] - Models
//! - [`AuthNResolverError`] - Error types
//!
//! ## Usage
//!
//! ```ignore
//! use authn_resolver_sdk::AuthNResolverClient;
//!
//! // Sign in and obtain a session token
//! let grant = authn.sign_in("jane@example.com", "secret").await?;
//!
//! // Later, resolve the identity carried by the token
//! let identity = authn.refresh_session(&grant.token.token).await?;
//! ```

pub mod api;
pub mod error;
pub mod models;
pub mod plugin_api;
pub mod store_api;

// Re-export main types at crate root
pub use api::AuthNResolverClient;
pub use error::{AuthNResolverError, IdentityProviderError, UserStoreError};
pub use models::{FederatedAssertion, ProviderUser, SessionGrant, SignedToken, UserRecord};
pub use plugin_api::IdentityProviderClient;
pub use store_api::UserStoreClient;
