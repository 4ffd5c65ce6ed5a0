//! Creation assertions
//!
//! These invoke an OS capability (mkdir, link, symlink, umask, chdir) and
//! treat an OS error exactly like an assertion mismatch: one failure
//! report carrying the OS error as extra context, then control returns to
//! the test.

use crate::context::TestContext;
use crate::location::SourceLocation;
use crate::report::{report_failure, FailureDetail, Operand};
use std::io;
use std::path::Path;

fn os_failure(
    ctx: &mut TestContext,
    loc: SourceLocation,
    summary: &str,
    subject: Operand,
    err: &io::Error,
) -> bool {
    let detail = FailureDetail::new(summary, subject).with_note(format!(
        "os error: {} (code {})",
        err,
        err.raw_os_error().unwrap_or(-1)
    ));
    report_failure(ctx, loc, detail)
}

/// Create a directory with the given permission bits; report on failure.
pub fn make_dir(ctx: &mut TestContext, loc: SourceLocation, path: &Path, mode: u32) -> bool {
    ctx.record_check();
    let result = {
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            std::fs::DirBuilder::new().mode(mode).create(path)
        }
        #[cfg(not(unix))]
        {
            let _ = mode;
            std::fs::create_dir(path)
        }
    };
    match result {
        Ok(()) => true,
        Err(e) => os_failure(
            ctx,
            loc,
            "mkdir failed",
            Operand::new(path.display().to_string(), format!("mode {:04o}", mode)),
            &e,
        ),
    }
}

/// Create a hardlink to an existing file; report on failure.
pub fn make_hardlink(
    ctx: &mut TestContext,
    loc: SourceLocation,
    newpath: &Path,
    oldpath: &Path,
) -> bool {
    ctx.record_check();
    match std::fs::hard_link(oldpath, newpath) {
        Ok(()) => true,
        Err(e) => os_failure(
            ctx,
            loc,
            "hardlink failed",
            Operand::new(
                newpath.display().to_string(),
                format!("link to {}", oldpath.display()),
            ),
            &e,
        ),
    }
}

/// Create a symlink with the given literal target; report on failure.
#[cfg(unix)]
pub fn make_symlink(
    ctx: &mut TestContext,
    loc: SourceLocation,
    newpath: &Path,
    linkto: &str,
) -> bool {
    ctx.record_check();
    match std::os::unix::fs::symlink(linkto, newpath) {
        Ok(()) => true,
        Err(e) => os_failure(
            ctx,
            loc,
            "symlink failed",
            Operand::new(
                newpath.display().to_string(),
                format!("link to \"{}\"", linkto),
            ),
            &e,
        ),
    }
}

/// Symlink creation is not portable off Unix; the assertion fails with a
/// report rather than crashing, so tests can branch on the result.
#[cfg(not(unix))]
pub fn make_symlink(
    ctx: &mut TestContext,
    loc: SourceLocation,
    newpath: &Path,
    linkto: &str,
) -> bool {
    ctx.record_check();
    let detail = FailureDetail::new(
        "symlink failed",
        Operand::new(
            newpath.display().to_string(),
            format!("link to \"{}\"", linkto),
        ),
    )
    .with_note("symbolic links are not supported on this platform");
    report_failure(ctx, loc, detail)
}

/// Set the process umask. The OS call cannot fail on Unix; elsewhere this
/// records a trivially passing check so counters stay comparable across
/// platforms.
pub fn set_umask(ctx: &mut TestContext, _loc: SourceLocation, mask: u32) -> bool {
    ctx.record_check();
    #[cfg(unix)]
    unsafe {
        libc::umask(mask as libc::mode_t);
    }
    #[cfg(not(unix))]
    {
        let _ = mask;
    }
    true
}

/// Change the working directory; report on failure.
pub fn chdir(ctx: &mut TestContext, loc: SourceLocation, path: &Path) -> bool {
    ctx.record_check();
    match std::env::set_current_dir(path) {
        Ok(()) => true,
        Err(e) => os_failure(
            ctx,
            loc,
            "chdir failed",
            Operand::new(path.display().to_string(), "unreachable directory"),
            &e,
        ),
    }
}
