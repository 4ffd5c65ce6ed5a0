//! Logging infrastructure for the harness
//!
//! The runner logs its own lifecycle (test start/finish, scratch-dir
//! management, summary) through `tracing`; assertion output goes to the
//! diagnostic sink instead, so logs and test diagnostics can be filtered
//! independently.

use crate::error::{HarnessError, Result};
use std::io;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level
    pub level: Level,
    /// Enable colored output
    pub colored: bool,
    /// Include target module information
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            colored: true,
            include_target: false,
        }
    }
}

impl LoggingConfig {
    /// Map the runner's -q/-v flags onto a level.
    pub fn from_verbosity(quiet: bool, verbose: u8) -> Self {
        let level = if quiet {
            Level::ERROR
        } else {
            match verbose {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };
        Self {
            level,
            ..Self::default()
        }
    }
}

/// Initialize logging with the given configuration.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(config.level.into())
        .from_env_lossy();

    let ansi = config.colored && atty::is(atty::Stream::Stderr);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.include_target)
        .with_writer(io::stderr)
        .with_ansi(ansi);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| {
            HarnessError::internal_error(
                format!("Failed to initialize logging: {}", e),
                Some(file!()),
            )
        })
}
