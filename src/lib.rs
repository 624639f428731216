//! Build and installation orchestrator for the patchbay daemon.
//!
//! Wraps the repetitive steps around packaging the patchbay source tree
//! into named operations: rendering configuration templates, provisioning
//! `etc/` and `var/run/` paths, compiling the web-UI stylesheet, the two
//! install strategies (copy-based and symlink-based), artifact cleanup,
//! and the CI check pipeline.
//!
//! The public API is organised in layers:
//!
//! - **[`exec`]**: the subprocess seam every external step goes through
//! - **[`layout`]** and **[`metadata`]**: source tree facts and manifests
//! - **[`render`]** and **[`paths`]**: template rendering and path provisioning
//! - **[`commands`]**: the operation registry wired to the CLI
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod exec;
pub mod exit_codes;
pub mod layout;
pub mod logging;
pub mod metadata;
pub mod paths;
pub mod render;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Version stamped at build time, falling back to the crate version when
/// the build ran outside a git checkout.
#[must_use]
pub const fn version() -> &'static str {
    match option_env!("PATCHBAY_SETUP_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
}
