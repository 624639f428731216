//! Process exit codes.
//!
//! Lint findings get a dedicated code so CI pipelines can tell style
//! violations apart from broken builds or failed installs.

use crate::error::SetupError;

/// The requested operation completed.
pub const OK: i32 = 0;

/// Generic failure: a delegated step exited non-zero or an I/O error
/// occurred.
pub const FAILURE: i32 = 1;

/// The linter reported findings.
pub const LINT_FAILURE: i32 = 2;

/// Map a failed run to its process exit code.
#[must_use]
pub fn for_error(err: &anyhow::Error) -> i32 {
    if matches!(err.downcast_ref::<SetupError>(), Some(SetupError::LintFailed)) {
        LINT_FAILURE
    } else {
        FAILURE
    }
}
