//! Failure reporting for the assertion engine
//!
//! Every failed assertion flows through [`report_failure`], which formats
//! one newline-terminated block (source location, the literal operand
//! expressions, their rendered runtime values, any stashed message, any
//! archive diagnostic) to the context's diagnostic sink and bumps the
//! failure counter. Reports are flushed and discarded; nothing is retained
//! beyond the counters. Reporting never terminates the process.

pub mod render;

use crate::context::TestContext;
use crate::location::SourceLocation;
use std::fmt::Write as _;

/// A handle the archive-aware assertion variants can hand to the reporter
/// so a failure carries the library's own diagnostic state.
///
/// Absence of a source, or a source with nothing to say, is silently
/// omitted from the report.
pub trait DiagnosticSource {
    /// Extra diagnostic text for a failure report, if any is available.
    fn diagnostic(&self) -> Option<String>;
}

/// One rendered operand of a failed comparison
#[derive(Debug, Clone)]
pub struct Operand {
    /// Literal source text of the expression, as captured by the macro
    pub text: String,
    /// Rendered runtime value
    pub value: String,
}

impl Operand {
    pub fn new<T: Into<String>, V: Into<String>>(text: T, value: V) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
        }
    }
}

/// Everything the reporter needs to format one failure block
pub struct FailureDetail<'a> {
    /// Short description of what failed, e.g. "ints not equal"
    pub summary: &'a str,
    /// First operand (always present)
    pub operand1: Operand,
    /// Second operand (absent for single-subject assertions)
    pub operand2: Option<Operand>,
    /// Assertion-specific note, e.g. the first differing byte offset or
    /// the OS error from a failed creation call
    pub note: Option<String>,
    /// Archive handle to pull extra diagnostics from
    pub extra: Option<&'a dyn DiagnosticSource>,
}

impl<'a> FailureDetail<'a> {
    pub fn new(summary: &'a str, operand1: Operand) -> Self {
        Self {
            summary,
            operand1,
            operand2: None,
            note: None,
            extra: None,
        }
    }

    pub fn with_operand2(mut self, operand2: Operand) -> Self {
        self.operand2 = Some(operand2);
        self
    }

    pub fn with_note<S: Into<String>>(mut self, note: S) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_extra(mut self, extra: Option<&'a dyn DiagnosticSource>) -> Self {
        self.extra = extra;
        self
    }
}

/// Emit one failure block and bump the failure counter.
///
/// Returns `false` so call sites can `return report_failure(..)` and let
/// their callers branch on the outcome; continuing after a failure is the
/// caller's default policy, not the reporter's decision.
pub fn report_failure(ctx: &mut TestContext, loc: SourceLocation, detail: FailureDetail<'_>) -> bool {
    ctx.record_failure();

    let mut block = String::new();
    let _ = writeln!(block, "{}: Assertion failed: {}", loc, detail.summary);
    let _ = writeln!(block, "      {} = {}", detail.operand1.text, detail.operand1.value);
    if let Some(op2) = &detail.operand2 {
        let _ = writeln!(block, "      {} = {}", op2.text, op2.value);
    }
    if let Some(note) = &detail.note {
        let _ = writeln!(block, "      {}", note);
    }
    if let Some(message) = ctx.take_failure_message() {
        let _ = writeln!(block, "      reason: {}", message);
    }
    if let Some(diag) = detail.extra.and_then(|e| e.diagnostic()) {
        let _ = writeln!(block, "      archive: {}", diag);
    }

    ctx.write_block(&block);
    false
}
