//! Assertion macro surface
//!
//! Every macro captures the call site via [`crate::location!`] and expands
//! to a call into the comparator or filesystem layer, passing the literal
//! operand expressions as text so failure reports can quote them. Path
//! assertions accept `format!`-style arguments, so dynamic subjects like
//! `assert_file_exists!(ctx, "{}/out", dir)` still report the line of the
//! assertion itself.
//!
//! All macros evaluate to `bool`; callers may branch to skip dependent
//! steps, but a failure never aborts the test.

/// Assert a boolean expression holds.
#[macro_export]
macro_rules! assert_holds {
    ($ctx:expr, $cond:expr) => {
        $crate::compare::holds($ctx, $crate::location!(), $cond, stringify!($cond), None)
    };
}

/// [`assert_holds!`] with an archive handle for extra diagnostics.
#[macro_export]
macro_rules! assert_holds_a {
    ($ctx:expr, $archive:expr, $cond:expr) => {
        $crate::compare::holds(
            $ctx,
            $crate::location!(),
            $cond,
            stringify!($cond),
            Some($archive as &dyn $crate::report::DiagnosticSource),
        )
    };
}

/// Assert two integers are the same. Reports the value of each one if not.
#[macro_export]
macro_rules! assert_equal_int {
    ($ctx:expr, $v1:expr, $v2:expr) => {
        $crate::compare::equal_int(
            $ctx,
            $crate::location!(),
            ($v1) as i64,
            stringify!($v1),
            ($v2) as i64,
            stringify!($v2),
            None,
        )
    };
}

/// [`assert_equal_int!`] with an archive handle for extra diagnostics.
#[macro_export]
macro_rules! assert_equal_int_a {
    ($ctx:expr, $archive:expr, $v1:expr, $v2:expr) => {
        $crate::compare::equal_int(
            $ctx,
            $crate::location!(),
            ($v1) as i64,
            stringify!($v1),
            ($v2) as i64,
            stringify!($v2),
            Some($archive as &dyn $crate::report::DiagnosticSource),
        )
    };
}

/// Assert two optional narrow strings are the same.
#[macro_export]
macro_rules! assert_equal_str {
    ($ctx:expr, $v1:expr, $v2:expr) => {
        $crate::compare::equal_str(
            $ctx,
            $crate::location!(),
            $v1,
            stringify!($v1),
            $v2,
            stringify!($v2),
            None,
        )
    };
}

/// [`assert_equal_str!`] with an archive handle for extra diagnostics.
#[macro_export]
macro_rules! assert_equal_str_a {
    ($ctx:expr, $archive:expr, $v1:expr, $v2:expr) => {
        $crate::compare::equal_str(
            $ctx,
            $crate::location!(),
            $v1,
            stringify!($v1),
            $v2,
            stringify!($v2),
            Some($archive as &dyn $crate::report::DiagnosticSource),
        )
    };
}

/// Assert two optional wide strings (`&[u16]`) are the same.
#[macro_export]
macro_rules! assert_equal_wstr {
    ($ctx:expr, $v1:expr, $v2:expr) => {
        $crate::compare::equal_wstr(
            $ctx,
            $crate::location!(),
            $v1,
            stringify!($v1),
            $v2,
            stringify!($v2),
            None,
        )
    };
}

/// Assert the first `len` bytes of two buffers are the same.
#[macro_export]
macro_rules! assert_equal_mem {
    ($ctx:expr, $v1:expr, $v2:expr, $len:expr) => {
        $crate::compare::equal_bytes(
            $ctx,
            $crate::location!(),
            $v1,
            stringify!($v1),
            $v2,
            stringify!($v2),
            $len,
            None,
        )
    };
}

/// Assert that a file exists; supports `format!`-style path arguments.
#[macro_export]
macro_rules! assert_file_exists {
    ($ctx:expr, $($arg:tt)+) => {{
        let __path = ::std::format!($($arg)+);
        $crate::fsassert::file_exists($ctx, $crate::location!(), ::std::path::Path::new(&__path))
    }};
}

/// Assert that a file does not exist; supports `format!`-style path arguments.
#[macro_export]
macro_rules! assert_file_not_exists {
    ($ctx:expr, $($arg:tt)+) => {{
        let __path = ::std::format!($($arg)+);
        $crate::fsassert::file_not_exists($ctx, $crate::location!(), ::std::path::Path::new(&__path))
    }};
}

/// Assert that a file is empty; supports `format!`-style path arguments.
#[macro_export]
macro_rules! assert_empty_file {
    ($ctx:expr, $($arg:tt)+) => {{
        let __path = ::std::format!($($arg)+);
        $crate::fsassert::empty_file($ctx, $crate::location!(), ::std::path::Path::new(&__path))
    }};
}

/// Assert that a file is not empty; supports `format!`-style path arguments.
#[macro_export]
macro_rules! assert_non_empty_file {
    ($ctx:expr, $($arg:tt)+) => {{
        let __path = ::std::format!($($arg)+);
        $crate::fsassert::non_empty_file($ctx, $crate::location!(), ::std::path::Path::new(&__path))
    }};
}

/// Assert file contents match a byte buffer; path takes `format!`-style
/// arguments.
#[macro_export]
macro_rules! assert_file_contents {
    ($ctx:expr, $expected:expr, $($arg:tt)+) => {{
        let __path = ::std::format!($($arg)+);
        $crate::fsassert::file_contents(
            $ctx,
            $crate::location!(),
            $expected,
            ::std::path::Path::new(&__path),
        )
    }};
}

/// Assert file contents match a string, treating the file as text; path
/// takes `format!`-style arguments.
#[macro_export]
macro_rules! assert_text_file_contents {
    ($ctx:expr, $expected:expr, $($arg:tt)+) => {{
        let __path = ::std::format!($($arg)+);
        $crate::fsassert::text_file_contents(
            $ctx,
            $crate::location!(),
            $expected,
            ::std::path::Path::new(&__path),
        )
    }};
}

/// Assert two files have identical contents; the second path takes
/// `format!`-style arguments.
#[macro_export]
macro_rules! assert_equal_file {
    ($ctx:expr, $path1:expr, $($arg:tt)+) => {{
        let __path2 = ::std::format!($($arg)+);
        $crate::fsassert::equal_file(
            $ctx,
            $crate::location!(),
            ::std::path::Path::new(&$path1),
            ::std::path::Path::new(&__path2),
        )
    }};
}

/// Assert a file's exact size.
#[macro_export]
macro_rules! assert_file_size {
    ($ctx:expr, $path:expr, $size:expr) => {
        $crate::fsassert::file_size(
            $ctx,
            $crate::location!(),
            ::std::path::Path::new(&$path),
            ($size) as u64,
        )
    };
}

/// Assert a file's hardlink count.
#[macro_export]
macro_rules! assert_file_nlinks {
    ($ctx:expr, $path:expr, $nlinks:expr) => {
        $crate::fsassert::file_nlinks(
            $ctx,
            $crate::location!(),
            ::std::path::Path::new(&$path),
            ($nlinks) as u64,
        )
    };
}

/// Assert two paths are hardlinks of each other.
#[macro_export]
macro_rules! assert_file_hardlinks {
    ($ctx:expr, $path1:expr, $path2:expr) => {
        $crate::fsassert::file_hardlinks(
            $ctx,
            $crate::location!(),
            ::std::path::Path::new(&$path1),
            ::std::path::Path::new(&$path2),
        )
    };
}

/// Assert a path is a directory, optionally with exact permission bits.
#[macro_export]
macro_rules! assert_is_dir {
    ($ctx:expr, $path:expr) => {
        $crate::fsassert::is_dir($ctx, $crate::location!(), ::std::path::Path::new(&$path), None)
    };
    ($ctx:expr, $path:expr, $mode:expr) => {
        $crate::fsassert::is_dir(
            $ctx,
            $crate::location!(),
            ::std::path::Path::new(&$path),
            Some(($mode) as u32),
        )
    };
}

/// Assert a path is a regular file, optionally with exact permission bits.
#[macro_export]
macro_rules! assert_is_reg {
    ($ctx:expr, $path:expr) => {
        $crate::fsassert::is_reg($ctx, $crate::location!(), ::std::path::Path::new(&$path), None)
    };
    ($ctx:expr, $path:expr, $mode:expr) => {
        $crate::fsassert::is_reg(
            $ctx,
            $crate::location!(),
            ::std::path::Path::new(&$path),
            Some(($mode) as u32),
        )
    };
}

/// Assert a path is a symlink whose target text matches.
#[macro_export]
macro_rules! assert_is_symlink {
    ($ctx:expr, $path:expr, $contents:expr) => {
        $crate::fsassert::is_symlink(
            $ctx,
            $crate::location!(),
            ::std::path::Path::new(&$path),
            $contents,
        )
    };
}

/// Create a directory; report an error if it fails.
#[macro_export]
macro_rules! assert_make_dir {
    ($ctx:expr, $path:expr, $mode:expr) => {
        $crate::fsassert::create::make_dir(
            $ctx,
            $crate::location!(),
            ::std::path::Path::new(&$path),
            ($mode) as u32,
        )
    };
}

/// Create a hardlink; report an error if it fails.
#[macro_export]
macro_rules! assert_make_hardlink {
    ($ctx:expr, $newpath:expr, $oldpath:expr) => {
        $crate::fsassert::create::make_hardlink(
            $ctx,
            $crate::location!(),
            ::std::path::Path::new(&$newpath),
            ::std::path::Path::new(&$oldpath),
        )
    };
}

/// Create a symlink; report an error if it fails.
#[macro_export]
macro_rules! assert_make_symlink {
    ($ctx:expr, $newpath:expr, $linkto:expr) => {
        $crate::fsassert::create::make_symlink(
            $ctx,
            $crate::location!(),
            ::std::path::Path::new(&$newpath),
            $linkto,
        )
    };
}

/// Set the process umask.
#[macro_export]
macro_rules! assert_umask {
    ($ctx:expr, $mask:expr) => {
        $crate::fsassert::create::set_umask($ctx, $crate::location!(), ($mask) as u32)
    };
}

/// Change the working directory; report an error if it fails.
#[macro_export]
macro_rules! assert_chdir {
    ($ctx:expr, $path:expr) => {
        $crate::fsassert::create::chdir($ctx, $crate::location!(), ::std::path::Path::new(&$path))
    };
}

/// Record an intentionally skipped check with a formatted reason.
#[macro_export]
macro_rules! skip {
    ($ctx:expr, $($arg:tt)+) => {
        $ctx.skip($crate::location!(), format_args!($($arg)+))
    };
}

/// Stash a formatted message to attach to the next failure report.
#[macro_export]
macro_rules! failure {
    ($ctx:expr, $($arg:tt)+) => {
        $ctx.on_failure(format_args!($($arg)+))
    };
}
