//! Source-location capture for assertion attribution
//!
//! Every assertion macro captures the call site into a [`SourceLocation`]
//! and threads it explicitly through the check function, so each failure
//! report names the exact file and line of the assertion that produced it.

use std::fmt;

/// The (file, line) of an assertion call site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Capture the current source location.
///
/// Expands to a [`SourceLocation`] for the file and line of the macro
/// invocation itself.
#[macro_export]
macro_rules! location {
    () => {
        $crate::location::SourceLocation::new(file!(), line!())
    };
}
