//! Build artifact cleanup.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::Operation;
use crate::context::Context;
use crate::layout;
use crate::logging::Logger;

/// Remove build artifacts from the source tree and the docs.
///
/// The delegated standard step is strict; everything after it is
/// best-effort: a missing artifact is not an error and a failed removal is
/// logged and skipped.
#[derive(Debug, Clone, Copy)]
pub struct Clean;

impl Operation for Clean {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn description(&self) -> &'static str {
        "clean build, dist, pyc and egg from package and docs"
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        ctx.executor
            .run(&ctx.source_root, "python3", &["setup.py", "clean"])?;

        ctx.log.stage("Cleaning build artifacts");
        remove_tree(ctx.log, &ctx.source_root.join("build"));
        remove_tree(ctx.log, &ctx.source_root.join("dist"));
        for dir in egg_info_dirs(&ctx.source_root) {
            remove_tree(ctx.log, &dir);
        }
        for dir in pycache_dirs(&ctx.source_root) {
            remove_tree(ctx.log, &dir);
        }

        if ctx.source_root.join(layout::DOCS_DIR).is_dir() {
            match ctx.executor.run_unchecked(
                &ctx.source_root,
                "make",
                &["-C", layout::DOCS_DIR, "clean"],
            ) {
                Ok(status) if !status.success => ctx.log.warn("docs clean exited non-zero"),
                Ok(_) => {}
                Err(err) => ctx.log.warn(&format!("docs clean skipped: {err:#}")),
            }
        }
        Ok(())
    }
}

/// Remove a directory tree, logging the outcome. Missing is fine.
fn remove_tree(log: Logger, path: &Path) {
    match std::fs::remove_dir_all(path) {
        Ok(()) => log.info(&format!("removed {}", path.display())),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "nothing to remove");
        }
        Err(err) => log.warn(&format!("could not remove {}: {err}", path.display())),
    }
}

/// Top-level `*.egg-info` directories.
fn egg_info_dirs(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir() && path.extension().is_some_and(|ext| ext == "egg-info")
        })
        .collect();
    dirs.sort();
    dirs
}

/// Every `__pycache__` directory in the tree.
fn pycache_dirs(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect_pycache(root, &mut found);
    found.sort();
    found
}

fn collect_pycache(dir: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.filter_map(std::result::Result::ok) {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if entry.file_name() == "__pycache__" {
            found.push(path);
        } else {
            collect_pycache(&path, found);
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn egg_info_dirs_match_only_toplevel_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("patchbay.egg-info")).expect("mkdir");
        std::fs::write(dir.path().join("notes.egg-info"), "file, not dir").expect("write");
        std::fs::create_dir(dir.path().join("build")).expect("mkdir");

        assert_eq!(
            egg_info_dirs(dir.path()),
            vec![dir.path().join("patchbay.egg-info")]
        );
    }

    #[test]
    fn pycache_dirs_are_found_recursively() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("patchbay/core/__pycache__");
        let toplevel = dir.path().join("__pycache__");
        std::fs::create_dir_all(&nested).expect("mkdir");
        std::fs::create_dir_all(&toplevel).expect("mkdir");
        std::fs::write(nested.join("metadata.cpython-311.pyc"), "bytecode").expect("write");

        assert_eq!(pycache_dirs(dir.path()), vec![toplevel, nested]);
    }

    #[test]
    fn remove_tree_tolerates_missing_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        remove_tree(Logger::new(false), &dir.path().join("absent"));
    }

    #[test]
    fn remove_tree_deletes_populated_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let build = dir.path().join("build");
        std::fs::create_dir_all(build.join("lib")).expect("mkdir");
        std::fs::write(build.join("lib/module.py"), "x = 1").expect("write");

        remove_tree(Logger::new(false), &build);
        assert!(!build.exists());
    }
}
