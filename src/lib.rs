//! arctest - Archive regression-test assertion harness
//!
//! Lets archive-tool test authors state expectations against values and
//! the filesystem ("this file's contents equal X", "this path is a symlink
//! pointing to Y", "these two paths are hardlinked") and have every
//! failure reported with its source location and a readable diff, without
//! aborting the test program. Failures and skips aggregate into run
//! counters that decide the final exit status.

pub mod compare;
pub mod context;
pub mod error;
pub mod fixture;
pub mod fsassert;
pub mod location;
pub mod macros;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export main types for test-program usage
pub use error::{HarnessError, Result};

pub use context::{RunCounters, TestContext};
pub use location::SourceLocation;
pub use report::{DiagnosticSource, FailureDetail, Operand};

// Re-export filesystem types
pub use fsassert::{EntryKind, FsEntry, StatOutcome};

// Re-export fixture and runner surface
pub use fixture::{external_gzip_program, extract_reference_file, slurp_file, GzipVariant};
pub use runner::{run_main, Runner, RunnerArgs, TestCase};
pub use utils::config::HarnessConfig;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
