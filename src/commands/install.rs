//! System (copy-based) installation.

use anyhow::{Context as _, Result};

use super::Operation;
use crate::context::Context;
use crate::layout;
use crate::paths;
use crate::render;

/// Install the package and its configuration files.
///
/// The code-installation phase depends on the build flavor: wheel builds
/// delegate entirely to the standard step, while source installs first
/// force the pinned runtime dependencies the standard step does not
/// reliably pull. Configuration placement runs in both flavors.
#[derive(Debug, Clone, Copy)]
pub struct SystemInstall;

impl Operation for SystemInstall {
    fn name(&self) -> &'static str {
        "install"
    }

    fn description(&self) -> &'static str {
        "install the package and its configuration files"
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        ctx.log.stage("Installing patchbay");
        if ctx.bdist_wheel {
            ctx.executor.run(
                &ctx.source_root,
                "python3",
                &["-m", "pip", "install", "--no-deps", "."],
            )?;
        } else {
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
            ctx.executor.run(
                &ctx.source_root,
                "python3",
                &["-m", "pip", "install", "--no-deps", "."],
            )?;
        }

        render::render_set(
            &ctx.source_root,
            layout::TEMPLATE_FILES,
            &ctx.source_root,
            &ctx.render_vars(),
            &ctx.target,
        )?;
        copy_config_files(ctx)?;
        paths::ensure_runtime_dir(&ctx.target)
    }
}

/// Copy each plain configuration file to the same relative path under the
/// install target. Runs after rendering, so generated configs ship in
/// their rendered form.
fn copy_config_files(ctx: &Context) -> Result<()> {
    for rel in layout::ETC_FILES {
        let src = ctx.source_root.join(rel);
        let dst = ctx.target.root().join(rel);
        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::copy(&src, &dst)
            .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
        ctx.log.info(&format!("installed {}", dst.display()));
    }
    Ok(())
}
