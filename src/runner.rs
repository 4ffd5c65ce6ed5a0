//! Test-program driver
//!
//! Runs registered test cases one at a time, each in a fresh scratch
//! directory, hands every case its own [`TestContext`], merges the
//! counters afterwards, and turns the aggregate into a process exit code.
//! No discovery, no parallelism: cases run in registration order.

use crate::context::{RunCounters, TestContext};
use crate::error::{HarnessError, Result};
use crate::utils::config::HarnessConfig;
use crate::utils::logging::{init_logging, LoggingConfig};
use clap::Parser;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// The working directory is process-wide state; hold this while a case
/// runs inside its scratch directory so overlapping runners (e.g. the
/// harness's own test threads) cannot interleave chdir calls.
pub(crate) fn cwd_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One registered test case
#[derive(Clone, Copy)]
pub struct TestCase {
    pub name: &'static str,
    pub func: fn(&mut TestContext),
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish()
    }
}

/// Build a `TESTS` table from a list of `fn(&mut TestContext)` items.
#[macro_export]
macro_rules! define_tests {
    ($($name:ident),+ $(,)?) => {
        pub const TESTS: &[$crate::runner::TestCase] = &[
            $($crate::runner::TestCase {
                name: stringify!($name),
                func: $name,
            }),+
        ];
    };
}

/// Command line arguments for a test program built on this harness
#[derive(Parser, Debug, Default)]
#[command(about = "Archive regression-test driver", version)]
pub struct RunnerArgs {
    /// Only run tests whose name contains one of these patterns
    pub patterns: Vec<String>,

    /// Keep per-test scratch directories after the run
    #[arg(long)]
    pub keep_temp: bool,

    /// Directory holding reference fixture files
    #[arg(long, value_name = "DIR")]
    pub reference_dir: Option<PathBuf>,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Sequential driver for a registered test table
pub struct Runner {
    config: HarnessConfig,
}

impl Runner {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// Apply CLI overrides on top of the loaded configuration.
    pub fn with_args(mut config: HarnessConfig, args: &RunnerArgs) -> Self {
        if let Some(refdir) = &args.reference_dir {
            config.reference_dir = Some(refdir.clone());
        }
        if args.keep_temp {
            config.keep_temp = true;
        }
        Self { config }
    }

    fn selected<'a>(&self, cases: &'a [TestCase], patterns: &[String]) -> Vec<&'a TestCase> {
        cases
            .iter()
            .filter(|case| {
                patterns.is_empty() || patterns.iter().any(|p| case.name.contains(p.as_str()))
            })
            .collect()
    }

    /// Run one case in a fresh scratch directory, restoring the previous
    /// working directory afterwards.
    fn run_case(&self, case: &TestCase) -> Result<RunCounters> {
        let _cwd = cwd_lock();
        let scratch = tempfile::Builder::new()
            .prefix(&format!("arctest_{}.", case.name))
            .tempdir()
            .map_err(|e| HarnessError::scratch_error("Failed to create scratch directory", Some(e)))?;
        let previous_dir = std::env::current_dir()
            .map_err(|e| HarnessError::io_error("Cannot determine working directory", e))?;
        std::env::set_current_dir(scratch.path())
            .map_err(|e| HarnessError::scratch_error("Cannot enter scratch directory", Some(e)))?;

        tracing::info!(test = case.name, "running");
        let mut ctx = TestContext::new(self.config.clone());
        (case.func)(&mut ctx);
        let counters = ctx.into_counters();

        std::env::set_current_dir(&previous_dir)
            .map_err(|e| HarnessError::scratch_error("Cannot leave scratch directory", Some(e)))?;

        if self.config.keep_temp {
            let kept = scratch.into_path();
            tracing::info!(test = case.name, dir = %kept.display(), "scratch directory kept");
        }

        if counters.failures > 0 {
            tracing::warn!(test = case.name, failures = counters.failures, "FAILED");
        } else {
            tracing::debug!(test = case.name, checks = counters.assertions_checked, "ok");
        }
        Ok(counters)
    }

    /// Run every selected case and return the merged counters.
    pub fn run(&self, cases: &[TestCase], patterns: &[String]) -> Result<RunCounters> {
        let selected = self.selected(cases, patterns);
        let mut total = RunCounters::new();
        let mut failed_cases = 0usize;

        for case in &selected {
            let counters = self.run_case(case)?;
            if counters.failures > 0 {
                failed_cases += 1;
            }
            total.merge(&counters);
        }

        eprintln!(
            "{} of {} tests reported failures ({})",
            failed_cases,
            selected.len(),
            total
        );
        Ok(total)
    }
}

/// Full driver entry point for a test binary: parse arguments, set up
/// logging and configuration, run, and return the process exit code.
pub fn run_main(cases: &[TestCase]) -> i32 {
    let args = RunnerArgs::parse();
    if let Err(e) = init_logging(LoggingConfig::from_verbosity(args.quiet, args.verbose)) {
        eprintln!("warning: {}", e);
    }

    let config = match HarnessConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return 2;
        }
    };

    let runner = Runner::with_args(config, &args);
    match runner.run(cases, &args.patterns) {
        Ok(counters) => counters.exit_code(),
        Err(e) => {
            eprintln!("error: {}", e);
            2
        }
    }
}
