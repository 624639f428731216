//! Packaging metadata pre-hook.
//!
//! `pip` runs this step inside every build of the package, which makes it
//! the place to guarantee runtime dependencies and the compiled stylesheet
//! before the standard metadata generation runs.

use anyhow::Result;

use super::{Operation, assets};
use crate::context::Context;
use crate::layout;
use crate::metadata::Metadata;

/// Prepare files to be packed.
#[derive(Debug, Clone, Copy)]
pub struct EggInfo;

impl Operation for EggInfo {
    fn name(&self) -> &'static str {
        "egg_info"
    }

    fn description(&self) -> &'static str {
        "prepare files to be packed"
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let meta = Metadata::from_source(&ctx.source_root)?;
        ctx.log.stage(&format!(
            "Preparing patchbay {}",
            meta.version().unwrap_or("unknown")
        ));

        ctx.log.info("Installing dependencies...");
        ctx.executor.run(
            &ctx.source_root,
            "python3",
            &[
                "-m",
                "pip",
                "install",
                "--requirement",
                layout::RUN_REQUIREMENTS,
            ],
        )?;
        assets::ensure_built(ctx)?;
        ctx.executor
            .run(&ctx.source_root, "python3", &["setup.py", "egg_info"])
    }
}
