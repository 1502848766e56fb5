//! Inkstream Common Utilities
//!
//! Shared infrastructure for all Inkstream crates:
//! - Error types and result aliases
//! - Tracing/logging initialization
//! - Device calibration and logging configuration

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
