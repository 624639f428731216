// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed patchbay source tree paired with an
// isolated install target, plus a fluent builder, so each integration test
// can drive operations against a throwaway filesystem without repeating
// fixture boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use patchbay_setup::context::Context;
use patchbay_setup::test_support::{self, ScriptedExecutor};

/// An isolated source tree and install target, each backed by a
/// [`tempfile::TempDir`].
///
/// Both directories are automatically deleted when dropped (via the
/// underlying [`tempfile::TempDir`]).
pub struct IntegrationSite {
    /// Temporary directory holding the miniature patchbay source tree.
    pub source: tempfile::TempDir,
    /// Temporary directory standing in for the installation root.
    pub target: tempfile::TempDir,
}

impl IntegrationSite {
    /// Create a new site with a populated source tree and an empty target.
    pub fn new() -> Self {
        let source = tempfile::tempdir().expect("create source dir");
        let target = tempfile::tempdir().expect("create target dir");
        test_support::populate_source_tree(source.path()).expect("populate source tree");
        Self { source, target }
    }

    /// Path to the source tree root.
    pub fn source_path(&self) -> &Path {
        self.source.path()
    }

    /// Path to the install target root.
    pub fn target_path(&self) -> &Path {
        self.target.path()
    }

    /// Context over an all-succeeding executor, plus the handle used for
    /// asserting on recorded commands.
    pub fn context(&self) -> (Context, Arc<ScriptedExecutor>) {
        test_support::scripted_context(self.source.path(), self.target.path())
    }

    /// Context over the provided executor.
    ///
    /// Use this variant in tests that script command failures or `which`
    /// lookup misses.
    pub fn context_with(&self, executor: ScriptedExecutor) -> (Context, Arc<ScriptedExecutor>) {
        test_support::scripted_context_with(self.source.path(), self.target.path(), executor)
    }
}

/// Fluent builder for [`IntegrationSite`].
///
/// Allows individual tests to customise the source tree before the site is
/// finalised without modifying the shared fixture.
pub struct SiteBuilder {
    site: IntegrationSite,
}

impl SiteBuilder {
    /// Begin building a new site backed by a populated source tree.
    pub fn new() -> Self {
        Self {
            site: IntegrationSite::new(),
        }
    }

    /// Write `content` to `<source root>/<rel>`, creating parent directories
    /// and overwriting any file written by the shared fixture.
    pub fn with_source_file(self, rel: &str, content: &str) -> Self {
        let path = self.site.source.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source file parent");
        }
        std::fs::write(&path, content).expect("write source file");
        self
    }

    /// Create an empty directory at `<source root>/<rel>`.
    pub fn with_source_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.site.source.path().join(rel)).expect("create source dir");
        self
    }

    /// Remove `<source root>/<rel>` from the fixture, whether it is a file
    /// or a directory.
    pub fn without_source_path(self, rel: &str) -> Self {
        let path = self.site.source.path().join(rel);
        if path.is_dir() {
            std::fs::remove_dir_all(&path).expect("remove source dir");
        } else if path.symlink_metadata().is_ok() {
            std::fs::remove_file(&path).expect("remove source file");
        }
        self
    }

    /// Finish building and return the configured site.
    pub fn build(self) -> IntegrationSite {
        self.site
    }
}
