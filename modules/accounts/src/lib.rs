//! Accounts Module
//!
//! HTTP surface of the session pipeline: credential and federated sign-in
//! callbacks, session lookup and renewal, sign-out, and the admin-only role
//! assignment endpoint.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod domain;
pub mod module;

pub use module::AccountsModule;
