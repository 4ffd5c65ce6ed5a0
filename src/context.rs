//! Per-test execution context and run counters
//!
//! A [`TestContext`] replaces the process-wide state a classic C test
//! harness keeps in globals: the failure/skip/check counters, the
//! diagnostic sink, and the message stashed for the next failure all live
//! on an explicit object that is handed to every assertion. Concurrent
//! runs give each test its own context and merge the counters afterwards.

use crate::location::SourceLocation;
use crate::utils::config::HarnessConfig;
use std::fmt;
use std::io::Write;

/// Aggregate counters for a test run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Total assertions evaluated, pass or fail
    pub assertions_checked: u64,
    /// Assertions that failed
    pub failures: u64,
    /// Checks intentionally skipped
    pub skips: u64,
}

impl RunCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another counter set into this one.
    pub fn merge(&mut self, other: &RunCounters) {
        self.assertions_checked += other.assertions_checked;
        self.failures += other.failures;
        self.skips += other.skips;
    }

    /// A run succeeds iff nothing failed; skips do not count against it.
    pub fn success(&self) -> bool {
        self.failures == 0
    }

    /// Process exit code for a driver: zero iff the run succeeded.
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

impl fmt::Display for RunCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} checks, {} failures, {} skipped",
            self.assertions_checked, self.failures, self.skips
        )
    }
}

/// Execution context for one test body
///
/// Owns the counters, the diagnostic sink (stderr unless a test installs
/// a capture buffer), the harness configuration, and the optional message
/// stashed by `failure!` for the next failure report.
pub struct TestContext {
    counters: RunCounters,
    sink: Box<dyn Write>,
    config: HarnessConfig,
    pending_message: Option<String>,
}

impl TestContext {
    /// Context writing diagnostics to stderr.
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_sink(config, Box::new(std::io::stderr()))
    }

    /// Context writing diagnostics to a caller-supplied sink.
    pub fn with_sink(config: HarnessConfig, sink: Box<dyn Write>) -> Self {
        Self {
            counters: RunCounters::new(),
            sink,
            config,
            pending_message: None,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn counters(&self) -> &RunCounters {
        &self.counters
    }

    pub fn into_counters(self) -> RunCounters {
        self.counters
    }

    /// Stash a message to be attached to the next failure report.
    ///
    /// Last write wins; consumed by the next failure, pass or not. An
    /// unconsumed message from an assertion that passed is simply
    /// overwritten by the next stash.
    pub fn on_failure(&mut self, args: fmt::Arguments<'_>) {
        self.pending_message = Some(args.to_string());
    }

    /// Record an intentionally skipped check.
    ///
    /// Writes a block to the diagnostic sink, distinct from failures, and
    /// bumps the skip counter only.
    pub fn skip(&mut self, loc: SourceLocation, args: fmt::Arguments<'_>) {
        self.counters.skips += 1;
        let block = format!("{}: skipping: {}\n", loc, args);
        self.write_block(&block);
    }

    pub(crate) fn record_check(&mut self) {
        self.counters.assertions_checked += 1;
    }

    pub(crate) fn record_failure(&mut self) {
        self.counters.failures += 1;
    }

    pub(crate) fn take_failure_message(&mut self) -> Option<String> {
        self.pending_message.take()
    }

    /// Write a formatted block to the diagnostic sink.
    ///
    /// The sink is best-effort: a sink that cannot be written to must not
    /// turn a report into a panic, so errors are dropped.
    pub(crate) fn write_block(&mut self, block: &str) {
        let _ = self.sink.write_all(block.as_bytes());
        let _ = self.sink.flush();
    }
}

impl fmt::Debug for TestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestContext")
            .field("counters", &self.counters)
            .field("pending_message", &self.pending_message)
            .finish_non_exhaustive()
    }
}
