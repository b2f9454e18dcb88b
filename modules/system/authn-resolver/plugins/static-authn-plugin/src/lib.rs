#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static `AuthN` Plugin
//!
//! Development identity provider and user store for the `AuthN` resolver.
//!
//! - **Identity provider**: email/password users with Argon2 PHC hashes, plus a
//!   fixed table of federated assertions.
//! - **User store**: in-memory records keyed by user id, seeded from the
//!   configured users.
//!
//! ## Configuration
//!
//! ```yaml
//! static_authn:
//!   users:
//!     - uid: "admin-1"
//!       email: "admin@example.com"
//!       display_name: "Admin"
//!       password_hash: "$argon2id$v=19$m=19456,t=2,p=1$..."
//!       role: admin
//!   federated:
//!     - provider: google
//!       assertion: "dev-google-token"
//!       uid: "google-123"
//!       email: "guest@example.com"
//! ```
//!
//! Generate hashes with `eventhost-server hash-password`.

pub mod config;
pub mod domain;
pub mod module;

pub use domain::password::{PasswordError, hash_password, verify_password};
pub use module::StaticAuthNPlugin;
