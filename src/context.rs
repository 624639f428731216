//! Shared operation context.
//!
//! One [`Context`] is resolved at startup and borrowed by every operation:
//! the source tree location, the install target, the detected syslog
//! arguments, the console logger, and the subprocess seam. Tests construct
//! it directly with explicit fields instead of reading the environment.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::error::SetupError;
use crate::exec::{Executor, SystemExecutor};
use crate::layout::{self, InstallTarget};
use crate::logging::Logger;
use crate::render::RenderContext;

/// Everything an operation needs to run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Root of the patchbay source tree operations run against.
    pub source_root: PathBuf,
    /// Where configuration and runtime paths are installed.
    pub target: InstallTarget,
    /// Log-socket arguments templates interpolate.
    pub syslog_args: Vec<String>,
    /// Whether the install builds a binary wheel artifact.
    pub bdist_wheel: bool,
    /// Console logger.
    pub log: Logger,
    /// Subprocess seam; external steps never bypass it.
    pub executor: Arc<dyn Executor>,
}

impl Context {
    /// Resolve a context from CLI options and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the source root cannot be determined or does
    /// not contain the patchbay package.
    pub fn new(root_override: Option<&Path>, bdist_wheel: bool, log: Logger) -> Result<Self> {
        let source_root = resolve_source_root(root_override)?;
        Ok(Self {
            source_root,
            target: InstallTarget::from_env(),
            syslog_args: layout::detect_syslog_args(),
            bdist_wheel,
            log,
            executor: Arc::new(SystemExecutor),
        })
    }

    /// Template variables for this context.
    #[must_use]
    pub fn render_vars(&self) -> RenderContext {
        RenderContext::new(self.target.prefix(), self.syslog_args.clone())
    }
}

/// Locate the source tree: explicit override, then `PATCHBAY_ROOT`, then
/// the working directory. Whatever wins must contain the package.
fn resolve_source_root(root_override: Option<&Path>) -> Result<PathBuf> {
    let root = if let Some(root) = root_override {
        root.to_path_buf()
    } else if let Ok(env_root) = std::env::var("PATCHBAY_ROOT")
        && !env_root.is_empty()
    {
        PathBuf::from(env_root)
    } else {
        std::env::current_dir().context("resolving working directory")?
    };

    if root.join(layout::PACKAGE_DIR).is_dir() {
        Ok(root)
    } else {
        Err(SetupError::MissingSourceTree(root.display().to_string()).into())
    }
}
