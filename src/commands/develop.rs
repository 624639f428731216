//! Develop-mode installation.
//!
//! Instead of copying configuration into place, develop mode symlinks it
//! from the install target back into the working tree, so edits take
//! effect without re-installing. Occupied destinations are never touched;
//! re-rendering the sources is how changes propagate.

use std::path::Path;

use anyhow::{Context as _, Result};

use super::Operation;
use crate::context::Context;
use crate::layout;
use crate::paths;
use crate::render;

/// Install in develop mode with symlinked configuration.
#[derive(Debug, Clone, Copy)]
pub struct DevelopInstall;

impl Operation for DevelopInstall {
    fn name(&self) -> &'static str {
        "develop"
    }

    fn description(&self) -> &'static str {
        "install in develop mode with symlinked configuration"
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        ctx.log.stage("Installing patchbay in develop mode");
        ctx.executor.run(
            &ctx.source_root,
            "python3",
            &["-m", "pip", "install", "--no-deps", "--editable", "."],
        )?;

        render::render_set(
            &ctx.source_root,
            layout::TEMPLATE_FILES,
            &ctx.source_root,
            &ctx.render_vars(),
            &ctx.target,
        )?;
        link_config_files(ctx)?;
        paths::ensure_runtime_dir(&ctx.target)
    }
}

/// Symlink every configuration file from the install target back into the
/// source tree. A destination that already holds anything, including a
/// broken link, is left untouched.
fn link_config_files(ctx: &Context) -> Result<()> {
    for rel in config_file_names() {
        let src = ctx.source_root.join(&rel);
        let dst = ctx.target.root().join(&rel);
        if dst.symlink_metadata().is_ok() {
            ctx.log.debug(&format!("leaving {}", dst.display()));
            continue;
        }
        if let Some(parent) = dst.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        symlink_file(&src, &dst)
            .with_context(|| format!("linking {} -> {}", dst.display(), src.display()))?;
        ctx.log.info(&format!("linked {}", dst.display()));
    }
    Ok(())
}

/// Plain configuration names plus suffix-stripped template outputs,
/// deduplicated, in manifest order.
fn config_file_names() -> Vec<String> {
    let mut names: Vec<String> = layout::ETC_FILES.iter().map(|rel| (*rel).to_string()).collect();
    for rel in layout::TEMPLATE_FILES {
        let name = rel
            .strip_suffix(layout::TEMPLATE_SUFFIX)
            .unwrap_or(rel)
            .to_string();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn config_names_cover_plain_and_rendered_files_without_duplicates() {
        assert_eq!(
            config_file_names(),
            vec![
                "etc/patchbay/logging.ini".to_string(),
                "etc/patchbay/patchbay.conf".to_string(),
            ]
        );
    }

    #[test]
    #[cfg(unix)]
    fn develop_links_every_config_file() {
        let source = tempfile::tempdir().expect("tempdir");
        test_support::populate_source_tree(source.path()).expect("fixture");
        let target = tempfile::tempdir().expect("tempdir");
        let (ctx, exec) = test_support::scripted_context(source.path(), target.path());

        DevelopInstall.run(&ctx).expect("develop install");

        assert_eq!(
            exec.calls(),
            vec!["python3 -m pip install --no-deps --editable .".to_string()]
        );
        for rel in config_file_names() {
            let dst = target.path().join(&rel);
            let meta = dst.symlink_metadata().expect("link exists");
            assert!(meta.file_type().is_symlink(), "{rel} must be a symlink");
            assert_eq!(
                std::fs::read_link(&dst).expect("target"),
                source.path().join(&rel)
            );
        }
        assert!(target.path().join(layout::RUNTIME_DIR).is_dir());
    }

    #[test]
    #[cfg(unix)]
    fn develop_is_idempotent_and_leaves_existing_files_alone() {
        let source = tempfile::tempdir().expect("tempdir");
        test_support::populate_source_tree(source.path()).expect("fixture");
        let target = tempfile::tempdir().expect("tempdir");

        // An operator-managed config occupies one destination up front.
        let occupied = target.path().join("etc/patchbay/logging.ini");
        std::fs::create_dir_all(occupied.parent().expect("parent")).expect("mkdir");
        std::fs::write(&occupied, "operator-managed").expect("seed");

        let (ctx, _exec) = test_support::scripted_context(source.path(), target.path());
        DevelopInstall.run(&ctx).expect("first run");
        DevelopInstall.run(&ctx).expect("second run");

        assert_eq!(
            std::fs::read_to_string(&occupied).expect("content"),
            "operator-managed",
            "pre-existing files must be preserved"
        );
        let conf = target.path().join("etc/patchbay/patchbay.conf");
        assert!(
            conf.symlink_metadata().expect("meta").file_type().is_symlink(),
            "fresh destinations must still be linked"
        );
    }

    #[test]
    #[cfg(unix)]
    fn develop_leaves_broken_links_untouched() {
        let source = tempfile::tempdir().expect("tempdir");
        test_support::populate_source_tree(source.path()).expect("fixture");
        let target = tempfile::tempdir().expect("tempdir");

        let dangling = target.path().join("etc/patchbay/patchbay.conf");
        std::fs::create_dir_all(dangling.parent().expect("parent")).expect("mkdir");
        std::os::unix::fs::symlink("/nonexistent/patchbay.conf", &dangling).expect("dangle");

        let (ctx, _exec) = test_support::scripted_context(source.path(), target.path());
        DevelopInstall.run(&ctx).expect("run tolerates dangling link");

        assert_eq!(
            std::fs::read_link(&dangling).expect("still a link"),
            Path::new("/nonexistent/patchbay.conf"),
            "dangling link must not be replaced"
        );
    }
}
