//! cyclone-risk — cyclone risk assessment service.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod logging;
pub mod types;
pub mod snapshot;
pub mod risk;
pub mod data;
pub mod engine;
pub mod server;
