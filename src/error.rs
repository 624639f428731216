//! Error types for setup operations.
//!
//! Most failures travel as [`anyhow::Error`] with call-site context. This
//! module defines the small set of typed errors callers need to tell apart
//! programmatically, such as mapping lint findings to their dedicated
//! process exit code.

use thiserror::Error;

/// A failure an operation needs to distinguish from generic errors.
#[derive(Error, Debug)]
pub enum SetupError {
    /// The linter reported findings in the Python sources.
    #[error("linter reported findings")]
    LintFailed,

    /// A path listed in the template manifest does not carry the
    /// template suffix.
    #[error("not a template file: {0}")]
    NotATemplate(String),

    /// The CSS compiler is missing and bootstrapping the build
    /// requirements did not provide it.
    #[error("pysassc is not available even after installing the build requirements")]
    CompilerUnavailable,

    /// The resolved source root does not contain the patchbay package.
    #[error("no patchbay package under {0}")]
    MissingSourceTree(String),
}
