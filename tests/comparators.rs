//! Integration tests for the typed comparators
//!
//! Covers the comparator laws: equal subjects pass silently, unequal
//! subjects fail exactly once with both expressions and both rendered
//! values in the report, and the byte comparator names the first
//! differing offset.

use arctest::{
    assert_equal_int, assert_equal_mem, assert_equal_str, assert_equal_wstr, assert_holds,
    HarnessConfig, TestContext,
};
use proptest::prelude::*;
use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
struct CaptureSink(Arc<Mutex<Vec<u8>>>);

impl CaptureSink {
    fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for CaptureSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn captured_context() -> (TestContext, CaptureSink) {
    let sink = CaptureSink::new();
    let ctx = TestContext::with_sink(HarnessConfig::default(), Box::new(sink.clone()));
    (ctx, sink)
}

fn quiet_context() -> TestContext {
    TestContext::with_sink(HarnessConfig::default(), Box::new(std::io::sink()))
}

#[test]
fn unequal_ints_report_expressions_and_values() {
    let (mut ctx, sink) = captured_context();
    let count = 3i64;
    let expected = 5i64;

    assert!(!assert_equal_int!(&mut ctx, count, expected));

    let out = sink.contents();
    assert!(out.contains("tests/comparators.rs"));
    assert!(out.contains("count = 3"));
    assert!(out.contains("expected = 5"));
    assert_eq!(ctx.counters().failures, 1);
    assert_eq!(ctx.counters().assertions_checked, 1);
}

#[test]
fn unequal_strings_report_both_quoted() {
    let (mut ctx, sink) = captured_context();
    let actual = Some("world");
    let wanted = Some("hello");

    assert!(!assert_equal_str!(&mut ctx, actual, wanted));

    let out = sink.contents();
    assert!(out.contains("\"world\""));
    assert!(out.contains("\"hello\""));
}

#[test]
fn null_string_subject_is_reported_not_fatal() {
    let (mut ctx, sink) = captured_context();
    let absent: Option<&str> = None;

    assert!(!assert_equal_str!(&mut ctx, absent, Some("x")));

    assert!(sink.contents().contains("(null)"));
    assert_eq!(ctx.counters().failures, 1);
}

#[test]
fn byte_mismatch_names_first_differing_offset() {
    for offset in [0usize, 1, 7, 31, 63] {
        let (mut ctx, sink) = captured_context();
        let a: Vec<u8> = (0u8..64).collect();
        let mut b = a.clone();
        b[offset] ^= 0xff;

        assert!(!assert_equal_mem!(&mut ctx, Some(&a[..]), Some(&b[..]), a.len()));
        assert!(sink
            .contents()
            .contains(&format!("first difference at byte {}", offset)));
    }
}

#[test]
fn wide_string_mismatch_reports_decoded_text() {
    let (mut ctx, sink) = captured_context();
    let a: Vec<u16> = "entry-ä".encode_utf16().collect();
    let b: Vec<u16> = "entry-ö".encode_utf16().collect();

    assert!(!assert_equal_wstr!(&mut ctx, Some(&a[..]), Some(&b[..])));

    let out = sink.contents();
    assert!(out.contains("entry-ä"));
    assert!(out.contains("entry-ö"));
}

#[test]
fn failed_boolean_reports_expression_text() {
    let (mut ctx, sink) = captured_context();
    let result = -30;

    assert!(!assert_holds!(&mut ctx, result == 0));
    assert!(sink.contents().contains("result == 0"));
}

#[test]
fn failure_counter_increments_by_exactly_one_per_mismatch() {
    let mut ctx = quiet_context();

    assert_equal_int!(&mut ctx, 1, 2);
    assert_equal_int!(&mut ctx, 3, 3);
    assert_equal_str!(&mut ctx, Some("a"), Some("b"));

    assert_eq!(ctx.counters().failures, 2);
    assert_eq!(ctx.counters().assertions_checked, 3);
}

proptest! {
    #[test]
    fn equal_ints_always_pass(v in any::<i64>()) {
        let mut ctx = quiet_context();
        prop_assert!(assert_equal_int!(&mut ctx, v, v));
        prop_assert_eq!(ctx.counters().failures, 0);
    }

    #[test]
    fn unequal_ints_always_fail((a, b) in any::<(i64, i64)>().prop_filter("distinct", |(a, b)| a != b)) {
        let mut ctx = quiet_context();
        prop_assert!(!assert_equal_int!(&mut ctx, a, b));
        prop_assert_eq!(ctx.counters().failures, 1);
    }

    #[test]
    fn equal_strings_always_pass(s in ".*") {
        let mut ctx = quiet_context();
        prop_assert!(assert_equal_str!(&mut ctx, Some(s.as_str()), Some(s.as_str())));
        prop_assert_eq!(ctx.counters().failures, 0);
    }

    #[test]
    fn equal_buffers_always_pass(buf in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut ctx = quiet_context();
        prop_assert!(assert_equal_mem!(&mut ctx, Some(&buf[..]), Some(&buf[..]), buf.len()));
        prop_assert_eq!(ctx.counters().failures, 0);
    }

    #[test]
    fn buffers_differing_at_k_report_offset_k(
        buf in proptest::collection::vec(any::<u8>(), 1..256),
        k in any::<proptest::sample::Index>(),
    ) {
        let k = k.index(buf.len());
        let mut other = buf.clone();
        other[k] ^= 0x01;

        let (mut ctx, sink) = captured_context();
        prop_assert!(!assert_equal_mem!(&mut ctx, Some(&buf[..]), Some(&other[..]), buf.len()));
        let needle = format!("first difference at byte {}", k);
        prop_assert!(sink.contents().contains(&needle));
    }
}
