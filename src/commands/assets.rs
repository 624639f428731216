//! Web-UI asset pipeline.
//!
//! The daemon ships a compiled stylesheet. Building it needs `pysassc`
//! from the pinned build requirements, so the builder bootstraps the
//! compiler once when it is missing and re-checks exactly once.

use anyhow::{Context as _, Result};

use super::Operation;
use crate::context::Context;
use crate::error::SetupError;
use crate::layout;

/// Force a CSS (re)build from the SASS sources.
#[derive(Debug, Clone, Copy)]
pub struct BuildSass;

impl Operation for BuildSass {
    fn name(&self) -> &'static str {
        "build_sass"
    }

    fn description(&self) -> &'static str {
        "force CSS (re)build"
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        build(ctx)
    }
}

/// Compile the stylesheet, bootstrapping the compiler if needed.
///
/// # Errors
///
/// Returns [`SetupError::CompilerUnavailable`] when the compiler is still
/// missing after installing the build requirements, and propagates
/// bootstrap or compile failures.
pub fn build(ctx: &Context) -> Result<()> {
    if !ctx.executor.which("pysassc") {
        ctx.log.info("Installing build requirements...");
        ctx.executor.run(
            &ctx.source_root,
            "python3",
            &[
                "-m",
                "pip",
                "install",
                "--requirement",
                layout::BUILD_REQUIREMENTS,
            ],
        )?;
        if !ctx.executor.which("pysassc") {
            return Err(SetupError::CompilerUnavailable.into());
        }
    }

    ctx.log.stage("Building web UI stylesheet");
    let output = ctx.source_root.join(layout::CSS_OUTPUT);
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    ctx.executor.run(
        &ctx.source_root,
        "pysassc",
        &["--sourcemap", layout::SASS_ENTRY, layout::CSS_OUTPUT],
    )
}

/// Build unless the compiled stylesheet is already present.
///
/// Source distributions ship a pre-built stylesheet and install without
/// the compiler toolchain; an existing artifact is left alone.
///
/// # Errors
///
/// Same as [`build`].
pub fn ensure_built(ctx: &Context) -> Result<()> {
    if ctx.source_root.join(layout::CSS_OUTPUT).exists() {
        ctx.log.info("CSS already built. Not overriding it.");
        return Ok(());
    }
    build(ctx)
}
