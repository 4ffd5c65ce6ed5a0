//! Filesystem assertion layer
//!
//! Each assertion stats or reads the filesystem fresh (no descriptor is
//! cached between assertions), classifies the outcome, applies its policy,
//! and routes any failure through the reporter. All assertions return a
//! `bool` so callers can skip dependent steps, and none of them terminate
//! the test process.

pub mod create;

use crate::compare;
use crate::context::TestContext;
use crate::location::SourceLocation;
use crate::report::{report_failure, FailureDetail, Operand};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Classification of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Regular,
    Directory,
    Symlink,
    Other,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::Regular => "regular file",
            EntryKind::Directory => "directory",
            EntryKind::Symlink => "symlink",
            EntryKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Snapshot of one filesystem entry, recomputed per assertion
#[derive(Debug, Clone)]
pub struct FsEntry {
    pub kind: EntryKind,
    /// Permission bits (low 12 bits of st_mode on Unix; 0 elsewhere)
    pub mode_bits: u32,
    pub size: u64,
    pub link_count: u64,
    pub dev: u64,
    pub ino: u64,
    /// Literal link target, only for symlinks
    pub symlink_target: Option<PathBuf>,
}

/// Outcome of resolving a path
#[derive(Debug)]
pub enum StatOutcome {
    Found(FsEntry),
    Missing,
    Error(io::Error),
}

/// Stat a path without following a final symlink.
pub fn stat_entry(path: &Path) -> StatOutcome {
    let metadata = match fs::symlink_metadata(path) {
        Ok(md) => md,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return StatOutcome::Missing,
        Err(e) => return StatOutcome::Error(e),
    };

    let file_type = metadata.file_type();
    let kind = if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::Regular
    } else {
        EntryKind::Other
    };

    let symlink_target = if kind == EntryKind::Symlink {
        fs::read_link(path).ok()
    } else {
        None
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        StatOutcome::Found(FsEntry {
            kind,
            mode_bits: metadata.mode() & 0o7777,
            size: metadata.len(),
            link_count: metadata.nlink(),
            dev: metadata.dev(),
            ino: metadata.ino(),
            symlink_target,
        })
    }
    #[cfg(not(unix))]
    {
        StatOutcome::Found(FsEntry {
            kind,
            mode_bits: 0,
            size: metadata.len(),
            link_count: 1,
            dev: 0,
            ino: 0,
            symlink_target,
        })
    }
}

fn describe_outcome(outcome: &StatOutcome) -> String {
    match outcome {
        StatOutcome::Found(entry) => format!("{}, {} bytes", entry.kind, entry.size),
        StatOutcome::Missing => "missing".to_string(),
        StatOutcome::Error(e) => format!("stat error: {}", e),
    }
}

fn path_operand(path: &Path, outcome: &StatOutcome) -> Operand {
    Operand::new(path.display().to_string(), describe_outcome(outcome))
}

/// Assert the path resolves to some entry.
pub fn file_exists(ctx: &mut TestContext, loc: SourceLocation, path: &Path) -> bool {
    ctx.record_check();
    let outcome = stat_entry(path);
    if matches!(outcome, StatOutcome::Found(_)) {
        return true;
    }
    let detail = FailureDetail::new("file should exist", path_operand(path, &outcome));
    report_failure(ctx, loc, detail)
}

/// Assert the path resolves to no entry. Exact negation of
/// [`file_exists`] for a given path and point in time.
pub fn file_not_exists(ctx: &mut TestContext, loc: SourceLocation, path: &Path) -> bool {
    ctx.record_check();
    let outcome = stat_entry(path);
    if !matches!(outcome, StatOutcome::Found(_)) {
        return true;
    }
    let detail = FailureDetail::new("file should not exist", path_operand(path, &outcome));
    report_failure(ctx, loc, detail)
}

/// Assert the path is a regular file of size zero.
pub fn empty_file(ctx: &mut TestContext, loc: SourceLocation, path: &Path) -> bool {
    ctx.record_check();
    let outcome = stat_entry(path);
    if let StatOutcome::Found(entry) = &outcome {
        if entry.kind == EntryKind::Regular && entry.size == 0 {
            return true;
        }
    }
    let detail = FailureDetail::new("file should be empty", path_operand(path, &outcome));
    report_failure(ctx, loc, detail)
}

/// Assert the path is a regular file with at least one byte.
pub fn non_empty_file(ctx: &mut TestContext, loc: SourceLocation, path: &Path) -> bool {
    ctx.record_check();
    let outcome = stat_entry(path);
    if let StatOutcome::Found(entry) = &outcome {
        if entry.kind == EntryKind::Regular && entry.size > 0 {
            return true;
        }
    }
    let detail = FailureDetail::new("file should not be empty", path_operand(path, &outcome));
    report_failure(ctx, loc, detail)
}

/// Assert the file's size matches exactly.
pub fn file_size(ctx: &mut TestContext, loc: SourceLocation, path: &Path, size: u64) -> bool {
    ctx.record_check();
    let outcome = stat_entry(path);
    if let StatOutcome::Found(entry) = &outcome {
        if entry.size == size {
            return true;
        }
    }
    let detail = FailureDetail::new("file size mismatch", path_operand(path, &outcome))
        .with_operand2(Operand::new("expected size", size.to_string()));
    report_failure(ctx, loc, detail)
}

/// Assert the file's contents are byte-for-byte `expected`.
///
/// The mismatch report comes from the byte-buffer comparator, so it names
/// the first differing offset.
pub fn file_contents(
    ctx: &mut TestContext,
    loc: SourceLocation,
    expected: &[u8],
    path: &Path,
) -> bool {
    let actual = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            ctx.record_check();
            let detail = FailureDetail::new(
                "cannot read file for contents check",
                Operand::new(path.display().to_string(), format!("read error: {}", e)),
            );
            return report_failure(ctx, loc, detail);
        }
    };
    let len = expected.len().max(actual.len());
    compare::equal_bytes(
        ctx,
        loc,
        Some(&actual),
        &format!("contents of {}", path.display()),
        Some(expected),
        "expected contents",
        len,
        None,
    )
}

/// Assert the file's contents equal a caller-supplied string, treating the
/// file as text. Delegates the mismatch report to the string comparator.
pub fn text_file_contents(
    ctx: &mut TestContext,
    loc: SourceLocation,
    expected: &str,
    path: &Path,
) -> bool {
    let actual = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            ctx.record_check();
            let detail = FailureDetail::new(
                "cannot read file as text",
                Operand::new(path.display().to_string(), format!("read error: {}", e)),
            );
            return report_failure(ctx, loc, detail);
        }
    };
    compare::equal_str(
        ctx,
        loc,
        Some(&actual),
        &format!("contents of {}", path.display()),
        Some(expected),
        "expected contents",
        None,
    )
}

/// Assert two files have byte-identical contents.
pub fn equal_file(ctx: &mut TestContext, loc: SourceLocation, path1: &Path, path2: &Path) -> bool {
    let read = |ctx: &mut TestContext, path: &Path| match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            ctx.record_check();
            let detail = FailureDetail::new(
                "cannot read file for comparison",
                Operand::new(path.display().to_string(), format!("read error: {}", e)),
            );
            report_failure(ctx, loc, detail);
            None
        }
    };
    let Some(contents1) = read(ctx, path1) else {
        return false;
    };
    let Some(contents2) = read(ctx, path2) else {
        return false;
    };
    let len = contents1.len().max(contents2.len());
    compare::equal_bytes(
        ctx,
        loc,
        Some(&contents1),
        &format!("contents of {}", path1.display()),
        Some(&contents2),
        &format!("contents of {}", path2.display()),
        len,
        None,
    )
}

/// Assert the entry's hardlink count.
///
/// Directories are exempt when `dir_link_counts_reliable` is off in the
/// harness configuration (some platforms report deliberately inaccurate
/// counts for directories).
pub fn file_nlinks(ctx: &mut TestContext, loc: SourceLocation, path: &Path, nlinks: u64) -> bool {
    ctx.record_check();
    let outcome = stat_entry(path);
    if let StatOutcome::Found(entry) = &outcome {
        if entry.kind == EntryKind::Directory && !ctx.config().dir_link_counts_reliable {
            return true;
        }
        if entry.link_count == nlinks {
            return true;
        }
    }
    let detail = FailureDetail::new(
        "link count mismatch",
        Operand::new(
            path.display().to_string(),
            match &outcome {
                StatOutcome::Found(entry) => format!("{} links", entry.link_count),
                other => describe_outcome(other),
            },
        ),
    )
    .with_operand2(Operand::new("expected links", nlinks.to_string()));
    report_failure(ctx, loc, detail)
}

/// Assert two paths are hardlinks of each other (same device and inode).
pub fn file_hardlinks(
    ctx: &mut TestContext,
    loc: SourceLocation,
    path1: &Path,
    path2: &Path,
) -> bool {
    ctx.record_check();
    let outcome1 = stat_entry(path1);
    let outcome2 = stat_entry(path2);
    if let (StatOutcome::Found(e1), StatOutcome::Found(e2)) = (&outcome1, &outcome2) {
        if e1.dev == e2.dev && e1.ino == e2.ino {
            return true;
        }
    }
    let identity = |outcome: &StatOutcome| match outcome {
        StatOutcome::Found(e) => format!("dev {} ino {}", e.dev, e.ino),
        other => describe_outcome(other),
    };
    let detail = FailureDetail::new(
        "paths are not hardlinked",
        Operand::new(path1.display().to_string(), identity(&outcome1)),
    )
    .with_operand2(Operand::new(path2.display().to_string(), identity(&outcome2)));
    report_failure(ctx, loc, detail)
}

fn kind_check(
    ctx: &mut TestContext,
    loc: SourceLocation,
    path: &Path,
    expected_kind: EntryKind,
    mode: Option<u32>,
) -> bool {
    ctx.record_check();
    let outcome = stat_entry(path);
    if let StatOutcome::Found(entry) = &outcome {
        if entry.kind == expected_kind {
            match mode {
                // Mode bits are only meaningful where stat reports them.
                Some(expected_mode) if cfg!(unix) => {
                    if entry.mode_bits == expected_mode {
                        return true;
                    }
                    let detail = FailureDetail::new(
                        "permission bits mismatch",
                        Operand::new(
                            path.display().to_string(),
                            format!("mode {:04o}", entry.mode_bits),
                        ),
                    )
                    .with_operand2(Operand::new(
                        "expected mode",
                        format!("{:04o}", expected_mode),
                    ));
                    return report_failure(ctx, loc, detail);
                }
                _ => return true,
            }
        }
    }
    let detail = FailureDetail::new(
        "entry kind mismatch",
        Operand::new(path.display().to_string(), describe_outcome(&outcome)),
    )
    .with_operand2(Operand::new("expected kind", expected_kind.to_string()));
    report_failure(ctx, loc, detail)
}

/// Assert the path is a directory, optionally with exact permission bits.
pub fn is_dir(ctx: &mut TestContext, loc: SourceLocation, path: &Path, mode: Option<u32>) -> bool {
    kind_check(ctx, loc, path, EntryKind::Directory, mode)
}

/// Assert the path is a regular file, optionally with exact permission bits.
pub fn is_reg(ctx: &mut TestContext, loc: SourceLocation, path: &Path, mode: Option<u32>) -> bool {
    kind_check(ctx, loc, path, EntryKind::Regular, mode)
}

/// Assert the path is a symlink whose literal target text matches.
pub fn is_symlink(
    ctx: &mut TestContext,
    loc: SourceLocation,
    path: &Path,
    contents: &str,
) -> bool {
    ctx.record_check();
    let outcome = stat_entry(path);
    if let StatOutcome::Found(entry) = &outcome {
        if entry.kind == EntryKind::Symlink {
            let target = entry
                .symlink_target
                .as_ref()
                .map(|t| t.to_string_lossy().into_owned());
            if target.as_deref() == Some(contents) {
                return true;
            }
            let detail = FailureDetail::new(
                "symlink target mismatch",
                Operand::new(
                    path.display().to_string(),
                    crate::report::render::render_str(target.as_deref()),
                ),
            )
            .with_operand2(Operand::new(
                "expected target",
                crate::report::render::render_str(Some(contents)),
            ));
            return report_failure(ctx, loc, detail);
        }
    }
    let detail = FailureDetail::new(
        "entry kind mismatch",
        Operand::new(path.display().to_string(), describe_outcome(&outcome)),
    )
    .with_operand2(Operand::new("expected kind", EntryKind::Symlink.to_string()));
    report_failure(ctx, loc, detail)
}
