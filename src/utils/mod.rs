//! Utility modules for the harness
//!
//! Configuration loading and logging setup used by the runner and, via
//! [`crate::context::TestContext`], by the assertion layer.

pub mod config;
pub mod logging;

pub use config::{HarnessConfig, ToolsConfig};
pub use logging::{init_logging, LoggingConfig};
