//! Events Module
//!
//! Read-only catalogue of configured events and their guest lists. Access is
//! governed entirely by the gateway's route tables.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod module;

pub use config::{EventConfig, EventsConfig, GuestConfig};
pub use module::EventsModule;
