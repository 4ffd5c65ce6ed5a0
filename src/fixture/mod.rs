//! Reference-file and external-tool bridge
//!
//! Thin passthroughs the archive tests need: copying a named reference
//! fixture into the current working directory, looking up the external
//! gzip helper, and slurping whole files for content checks.

use crate::context::TestContext;
use crate::location::SourceLocation;
use crate::report::{report_failure, FailureDetail, Operand};
use crate::utils::config::HarnessConfig;
use std::path::Path;

/// Which direction the external gzip helper runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GzipVariant {
    Compress,
    Decompress,
}

/// Name or path of the configured external gzip helper.
///
/// Pure configuration lookup; tests that shell out decide what to do when
/// the program is absent (typically `skip!`).
pub fn external_gzip_program(config: &HarnessConfig, variant: GzipVariant) -> &str {
    match variant {
        GzipVariant::Compress => &config.tools.gzip,
        GzipVariant::Decompress => &config.tools.gunzip,
    }
}

/// Copy the named reference fixture into the current working directory.
///
/// A missing reference directory or an uncopyable fixture is reported as
/// a failure; the test continues, likely degraded, which is acceptable.
pub fn extract_reference_file(ctx: &mut TestContext, loc: SourceLocation, name: &str) -> bool {
    ctx.record_check();

    let Some(refdir) = ctx.config().reference_dir.clone() else {
        let detail = FailureDetail::new(
            "cannot extract reference file",
            Operand::new(name, "no reference directory configured"),
        );
        return report_failure(ctx, loc, detail);
    };

    let source = refdir.join(name);
    match std::fs::copy(&source, name) {
        Ok(_) => true,
        Err(e) => {
            let detail = FailureDetail::new(
                "cannot extract reference file",
                Operand::new(source.display().to_string(), format!("copy error: {}", e)),
            );
            report_failure(ctx, loc, detail)
        }
    }
}

/// Read a whole file, `None` on any error. Convenience for tests that
/// want to hand file contents to a comparator themselves.
pub fn slurp_file(path: &Path) -> Option<Vec<u8>> {
    std::fs::read(path).ok()
}
