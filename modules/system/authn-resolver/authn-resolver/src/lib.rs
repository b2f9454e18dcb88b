//! `AuthN` Resolver Module
//!
//! Verifies credentials against the configured identity provider, resolves the
//! persisted role from the user store and issues signed session tokens.
//!
//! Provides the `AuthNResolverClient` implementation consumed by the API gateway
//! and the accounts module.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use config::{AuthNResolverConfig, FirstLoginConfig, TokenConfig};
pub use module::build_client;
