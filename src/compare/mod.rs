//! Typed comparators
//!
//! One entry point per subject type, all sharing the shape
//! `equal_*(ctx, loc, v1, v1_text, v2, v2_text, extra) -> bool`. Equal
//! subjects pass silently; unequal subjects produce one failure report
//! rendered appropriately for the type, then control returns to the test.
//! Each call counts as exactly one checked assertion.

use crate::context::TestContext;
use crate::location::SourceLocation;
use crate::report::render;
use crate::report::{report_failure, DiagnosticSource, FailureDetail, Operand};

/// Plain boolean assertion. Reports the expression text on failure.
pub fn holds(
    ctx: &mut TestContext,
    loc: SourceLocation,
    condition: bool,
    expr_text: &str,
    extra: Option<&dyn DiagnosticSource>,
) -> bool {
    ctx.record_check();
    if condition {
        return true;
    }
    let detail = FailureDetail::new(
        "expression is false",
        Operand::new(expr_text, "false"),
    )
    .with_extra(extra);
    report_failure(ctx, loc, detail)
}

/// Compare two values as 64-bit signed integers.
pub fn equal_int(
    ctx: &mut TestContext,
    loc: SourceLocation,
    v1: i64,
    v1_text: &str,
    v2: i64,
    v2_text: &str,
    extra: Option<&dyn DiagnosticSource>,
) -> bool {
    ctx.record_check();
    if v1 == v2 {
        return true;
    }
    let detail = FailureDetail::new("ints not equal", Operand::new(v1_text, v1.to_string()))
        .with_operand2(Operand::new(v2_text, v2.to_string()))
        .with_extra(extra);
    report_failure(ctx, loc, detail)
}

/// Compare two narrow strings byte-wise.
///
/// A present-vs-absent mismatch is an ordinary reportable failure, never a
/// crash; two absent subjects are equal.
pub fn equal_str(
    ctx: &mut TestContext,
    loc: SourceLocation,
    v1: Option<&str>,
    v1_text: &str,
    v2: Option<&str>,
    v2_text: &str,
    extra: Option<&dyn DiagnosticSource>,
) -> bool {
    ctx.record_check();
    if v1 == v2 {
        return true;
    }
    let detail = FailureDetail::new(
        "strings not equal",
        Operand::new(v1_text, render::render_str(v1)),
    )
    .with_operand2(Operand::new(v2_text, render::render_str(v2)))
    .with_extra(extra);
    report_failure(ctx, loc, detail)
}

/// Compare two wide strings (UTF-16-style code units), same semantics as
/// [`equal_str`].
pub fn equal_wstr(
    ctx: &mut TestContext,
    loc: SourceLocation,
    v1: Option<&[u16]>,
    v1_text: &str,
    v2: Option<&[u16]>,
    v2_text: &str,
    extra: Option<&dyn DiagnosticSource>,
) -> bool {
    ctx.record_check();
    if v1 == v2 {
        return true;
    }
    let detail = FailureDetail::new(
        "wide strings not equal",
        Operand::new(v1_text, render::render_wstr(v1)),
    )
    .with_operand2(Operand::new(v2_text, render::render_wstr(v2)))
    .with_extra(extra);
    report_failure(ctx, loc, detail)
}

/// Compare the first `len` bytes of two buffers.
///
/// The mismatch report names the first differing offset and shows a
/// bounded hex preview of each buffer around it. A buffer shorter than
/// `len` mismatches at the short buffer's end.
pub fn equal_bytes(
    ctx: &mut TestContext,
    loc: SourceLocation,
    v1: Option<&[u8]>,
    v1_text: &str,
    v2: Option<&[u8]>,
    v2_text: &str,
    len: usize,
    extra: Option<&dyn DiagnosticSource>,
) -> bool {
    ctx.record_check();
    match (v1, v2) {
        (None, None) => true,
        (Some(b1), Some(b2)) => match render::first_mismatch(b1, b2, len) {
            None => true,
            Some(offset) => {
                let detail = FailureDetail::new(
                    "byte buffers not equal",
                    Operand::new(v1_text, render::hex_window(b1, offset)),
                )
                .with_operand2(Operand::new(v2_text, render::hex_window(b2, offset)))
                .with_note(format!("first difference at byte {}", offset))
                .with_extra(extra);
                report_failure(ctx, loc, detail)
            }
        },
        (b1, b2) => {
            let render_opt = |b: Option<&[u8]>| match b {
                None => "(null)".to_string(),
                Some(b) => format!("{} bytes", b.len()),
            };
            let detail = FailureDetail::new(
                "byte buffers not equal",
                Operand::new(v1_text, render_opt(b1)),
            )
            .with_operand2(Operand::new(v2_text, render_opt(b2)))
            .with_extra(extra);
            report_failure(ctx, loc, detail)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::HarnessConfig;

    fn quiet_context() -> TestContext {
        TestContext::with_sink(HarnessConfig::default(), Box::new(std::io::sink()))
    }

    fn here() -> SourceLocation {
        SourceLocation::new("tests/compare.rs", 1)
    }

    #[test]
    fn test_equal_ints_pass_silently() {
        let mut ctx = quiet_context();
        assert!(equal_int(&mut ctx, here(), 42, "a", 42, "b", None));
        assert_eq!(ctx.counters().failures, 0);
        assert_eq!(ctx.counters().assertions_checked, 1);
    }

    #[test]
    fn test_unequal_ints_fail_once() {
        let mut ctx = quiet_context();
        assert!(!equal_int(&mut ctx, here(), 1, "a", 2, "b", None));
        assert_eq!(ctx.counters().failures, 1);
    }

    #[test]
    fn test_string_null_subject_is_failure_not_crash() {
        let mut ctx = quiet_context();
        assert!(!equal_str(&mut ctx, here(), None, "a", Some("x"), "b", None));
        assert!(equal_str(&mut ctx, here(), None, "a", None, "b", None));
        assert_eq!(ctx.counters().failures, 1);
        assert_eq!(ctx.counters().assertions_checked, 2);
    }

    #[test]
    fn test_wide_string_comparison() {
        let mut ctx = quiet_context();
        let a: Vec<u16> = "entry".encode_utf16().collect();
        let b: Vec<u16> = "entry".encode_utf16().collect();
        let c: Vec<u16> = "other".encode_utf16().collect();

        assert!(equal_wstr(&mut ctx, here(), Some(&a), "a", Some(&b), "b", None));
        assert!(!equal_wstr(&mut ctx, here(), Some(&a), "a", Some(&c), "c", None));
        assert_eq!(ctx.counters().failures, 1);
    }

    #[test]
    fn test_bytes_respect_explicit_length() {
        let mut ctx = quiet_context();
        // Differ beyond the compared prefix: still equal.
        assert!(equal_bytes(
            &mut ctx,
            here(),
            Some(&b"prefixAAA"[..]),
            "a",
            Some(&b"prefixBBB"[..]),
            "b",
            6,
            None,
        ));
        assert_eq!(ctx.counters().failures, 0);
    }

    #[test]
    fn test_bytes_mismatch_reports_failure() {
        let mut ctx = quiet_context();
        let a = b"abcdef";
        let mut b = *a;
        b[3] = b'!';
        assert!(!equal_bytes(&mut ctx, here(), Some(&a[..]), "a", Some(&b[..]), "b", a.len(), None));
        assert_eq!(ctx.counters().failures, 1);
    }

    #[test]
    fn test_holds_reports_expression_text() {
        let mut ctx = quiet_context();
        assert!(holds(&mut ctx, here(), 1 + 1 == 2, "1 + 1 == 2", None));
        assert!(!holds(&mut ctx, here(), false, "archive_ok(a)", None));
        assert_eq!(ctx.counters().failures, 1);
        assert_eq!(ctx.counters().assertions_checked, 2);
    }
}
