//! API Gateway
//!
//! Hosts the HTTP server and gates every request by role before it reaches a
//! handler.
//!
//! Middleware order (outermost -> innermost):
//! set request id -> propagate request id -> trace -> push request id to
//! extensions -> timeout -> gate -> router
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod auth;
pub mod config;
pub mod middleware;
pub mod module;
pub mod web;

pub use auth::{AccessDecision, AccessPolicy};
pub use config::ApiGatewayConfig;
pub use module::ApiGateway;
