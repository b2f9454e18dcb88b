//! `EventHost` server: configuration, logging and module wiring.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bootstrap;
pub mod config;
pub mod logging;

pub use bootstrap::{App, build_app};
pub use config::AppConfig;
