//! End-to-end harness scenarios
//!
//! Drives whole test cases through the runner the way an archive test
//! program would, and replays the write/assert/overwrite/assert scenario
//! against a captured diagnostic sink.

use arctest::{
    assert_text_file_contents, failure, skip, HarnessConfig, Runner, TestCase, TestContext,
};
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

#[test]
fn overwrite_scenario_reports_actual_and_expected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.txt");
    let base = dir.path().display().to_string();

    let sink = CaptureSink::new();
    let mut ctx = TestContext::with_sink(HarnessConfig::default(), Box::new(sink.clone()));

    std::fs::write(&path, "hello").unwrap();
    assert!(assert_text_file_contents!(&mut ctx, "hello", "{}/a.txt", base));
    let failures_before = ctx.counters().failures;

    std::fs::write(&path, "world").unwrap();
    assert!(!assert_text_file_contents!(&mut ctx, "hello", "{}/a.txt", base));

    assert_eq!(ctx.counters().failures, failures_before + 1);
    let out = sink.contents();
    assert!(out.contains("\"world\""));
    assert!(out.contains("\"hello\""));
    assert!(out.contains("tests/end_to_end.rs"));
}

#[test]
fn stashed_failure_message_reaches_the_report() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().display().to_string();
    std::fs::write(dir.path().join("a.txt"), "actual").unwrap();

    let sink = CaptureSink::new();
    let mut ctx = TestContext::with_sink(HarnessConfig::default(), Box::new(sink.clone()));

    failure!(&mut ctx, "after extracting entry {}", 12);
    assert!(!assert_text_file_contents!(&mut ctx, "expected", "{}/a.txt", base));

    assert!(sink.contents().contains("after extracting entry 12"));
}

fn case_all_pass(ctx: &mut TestContext) {
    std::fs::write("out.txt", "payload").unwrap();
    arctest::assert_file_exists!(ctx, "out.txt");
    arctest::assert_file_size!(ctx, "out.txt", 7);
    arctest::assert_text_file_contents!(ctx, "payload", "out.txt");
}

fn case_one_failure(ctx: &mut TestContext) {
    arctest::assert_file_exists!(ctx, "never-created.txt");
}

fn case_skips_only(ctx: &mut TestContext) {
    skip!(ctx, "external gzip not installed");
}

#[test]
fn runner_exit_code_is_zero_only_without_failures() {
    let passing: &[TestCase] = &[
        TestCase {
            name: "test_all_pass",
            func: case_all_pass,
        },
        TestCase {
            name: "test_skips_only",
            func: case_skips_only,
        },
    ];
    let runner = Runner::new(HarnessConfig::default());
    let counters = runner.run(passing, &[]).unwrap();
    assert_eq!(counters.failures, 0);
    assert_eq!(counters.skips, 1);
    assert_eq!(counters.exit_code(), 0);

    let mixed: &[TestCase] = &[
        TestCase {
            name: "test_all_pass",
            func: case_all_pass,
        },
        TestCase {
            name: "test_one_failure",
            func: case_one_failure,
        },
    ];
    let counters = runner.run(mixed, &[]).unwrap();
    assert_eq!(counters.failures, 1);
    assert_eq!(counters.exit_code(), 1);
}

#[test]
fn runner_name_filters_select_cases() {
    let cases: &[TestCase] = &[
        TestCase {
            name: "test_all_pass",
            func: case_all_pass,
        },
        TestCase {
            name: "test_one_failure",
            func: case_one_failure,
        },
    ];
    let runner = Runner::new(HarnessConfig::default());

    let counters = runner.run(cases, &["all_pass".to_string()]).unwrap();
    assert_eq!(counters.failures, 0);
    assert_eq!(counters.assertions_checked, 3);
}

mod registry {
    use arctest::TestContext;

    pub fn test_noop(_ctx: &mut TestContext) {}
    pub fn test_trivial(ctx: &mut TestContext) {
        arctest::assert_equal_int!(ctx, 0, 0);
    }

    arctest::define_tests!(test_noop, test_trivial);
}

#[test]
fn define_tests_builds_a_named_table() {
    assert_eq!(registry::TESTS.len(), 2);
    assert_eq!(registry::TESTS[0].name, "test_noop");

    let counters = Runner::new(HarnessConfig::default())
        .run(registry::TESTS, &[])
        .unwrap();
    assert_eq!(counters.assertions_checked, 1);
    assert_eq!(counters.exit_code(), 0);
}

#[test]
fn fixture_extraction_inside_a_runner_case() {
    let refdir = tempfile::tempdir().unwrap();
    std::fs::write(refdir.path().join("reference.tar"), b"ustar-bytes").unwrap();

    fn case_extract(ctx: &mut TestContext) {
        let loc = arctest::location!();
        if arctest::extract_reference_file(ctx, loc, "reference.tar") {
            arctest::assert_file_contents!(ctx, b"ustar-bytes", "reference.tar");
        }
    }

    let config = HarnessConfig {
        reference_dir: Some(refdir.path().to_path_buf()),
        ..HarnessConfig::default()
    };
    let cases: &[TestCase] = &[TestCase {
        name: "test_extract",
        func: case_extract,
    }];
    let counters = Runner::new(config).run(cases, &[]).unwrap();
    assert_eq!(counters.failures, 0);
    assert_eq!(counters.assertions_checked, 2);
}
