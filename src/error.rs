//! Error handling for the arctest harness
//!
//! These errors cover the harness's own infrastructure (configuration
//! loading, sink setup, scratch-directory management). Assertion failures
//! are NOT errors: they are reported to the diagnostic sink and surface as
//! a `false` return plus a counter increment, so a test keeps running.

use thiserror::Error;

/// Result type alias for harness infrastructure operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Error type for harness infrastructure failures
#[derive(Error, Debug)]
pub enum HarnessError {
    /// I/O related errors
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        file_path: Option<std::path::PathBuf>,
    },

    /// A reference fixture could not be located
    #[error("Missing fixture '{name}': {message}")]
    MissingFixture {
        name: String,
        message: String,
    },

    /// Scratch-directory setup or teardown errors
    #[error("Scratch directory error: {message}")]
    Scratch {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Internal errors (should not normally occur)
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        location: Option<&'static str>,
    },
}

impl HarnessError {
    /// Create a new I/O error with context
    pub fn io_error<S: Into<String>>(message: S, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config_error<S: Into<String>>(
        message: S,
        file_path: Option<std::path::PathBuf>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            file_path,
        }
    }

    /// Create a new missing-fixture error
    pub fn missing_fixture<S1: Into<String>, S2: Into<String>>(name: S1, message: S2) -> Self {
        Self::MissingFixture {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a new scratch-directory error
    pub fn scratch_error<S: Into<String>>(message: S, source: Option<std::io::Error>) -> Self {
        Self::Scratch {
            message: message.into(),
            source,
        }
    }

    /// Create a new internal error
    pub fn internal_error<S: Into<String>>(message: S, location: Option<&'static str>) -> Self {
        Self::Internal {
            message: message.into(),
            location,
        }
    }

    /// Get error category for reporting
    pub fn category(&self) -> &'static str {
        match self {
            HarnessError::Io { .. } => "io",
            HarnessError::Config { .. } => "config",
            HarnessError::MissingFixture { .. } => "fixture",
            HarnessError::Scratch { .. } => "scratch",
            HarnessError::Internal { .. } => "internal",
        }
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        Self::io_error("I/O operation failed", err)
    }
}

impl From<toml::de::Error> for HarnessError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_error(format!("TOML parsing failed: {}", err), None)
    }
}
