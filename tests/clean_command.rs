#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `clean` operation.
//!
//! These tests seed a source tree with the full matrix of build artifacts
//! and assert that `clean` removes exactly those, leaves the package
//! sources untouched, and degrades gracefully when the docs tree or the
//! delegated steps misbehave.

mod common;

use patchbay_setup::commands;
use patchbay_setup::test_support::ScriptedExecutor;

// ---------------------------------------------------------------------------
// Artifact matrix
// ---------------------------------------------------------------------------

/// `clean` must remove build, dist, egg-info, and bytecode cache
/// directories while leaving the package sources in place.
#[test]
fn clean_removes_every_artifact_kind() {
    let site = common::SiteBuilder::new()
        .with_source_file("build/lib/patchbay/__init__.py", "")
        .with_source_file("dist/patchbay-2.1.0.tar.gz", "tarball")
        .with_source_file("patchbay.egg-info/PKG-INFO", "Metadata-Version: 2.1")
        .with_source_file("__pycache__/setup.cpython-311.pyc", "bytecode")
        .with_source_file("patchbay/core/__pycache__/metadata.cpython-311.pyc", "bytecode")
        .build();
    let (ctx, _exec) = site.context();

    commands::dispatch("clean", &ctx).expect("clean");

    for artifact in [
        "build",
        "dist",
        "patchbay.egg-info",
        "__pycache__",
        "patchbay/core/__pycache__",
    ] {
        assert!(
            !site.source_path().join(artifact).exists(),
            "'{artifact}' must be removed"
        );
    }
    assert!(
        site.source_path().join("patchbay/core/metadata.py").is_file(),
        "package sources must survive a clean"
    );
    assert!(
        site.source_path().join("etc/patchbay/logging.ini").is_file(),
        "configuration files must survive a clean"
    );
}

/// A pristine tree cleans successfully; missing artifacts are not errors.
#[test]
fn clean_succeeds_with_nothing_to_remove() {
    let site = common::IntegrationSite::new();
    let (ctx, _exec) = site.context();

    commands::dispatch("clean", &ctx).expect("clean on a pristine tree");
}

// ---------------------------------------------------------------------------
// Delegated steps
// ---------------------------------------------------------------------------

/// `clean` must delegate to the standard step first and sweep the docs
/// tree last.
#[test]
fn clean_delegates_to_setup_and_docs() {
    let site = common::IntegrationSite::new();
    let (ctx, exec) = site.context();

    commands::dispatch("clean", &ctx).expect("clean");
    assert_eq!(
        exec.calls(),
        vec![
            "python3 setup.py clean".to_string(),
            "make -C docs clean".to_string(),
        ]
    );
}

/// Without a docs tree the docs sweep is skipped entirely.
#[test]
fn clean_skips_docs_when_the_tree_is_absent() {
    let site = common::SiteBuilder::new().without_source_path("docs").build();
    let (ctx, exec) = site.context();

    commands::dispatch("clean", &ctx).expect("clean without docs");
    assert_eq!(exec.calls(), vec!["python3 setup.py clean".to_string()]);
}

/// A failing standard step aborts the clean before any artifact is removed.
#[test]
fn clean_aborts_when_the_standard_step_fails() {
    let site = common::SiteBuilder::new()
        .with_source_file("build/lib/patchbay/__init__.py", "")
        .build();
    let (ctx, _exec) = site.context_with(ScriptedExecutor::new().fail_when("setup.py clean"));

    commands::dispatch("clean", &ctx).expect_err("standard step failed");
    assert!(
        site.source_path().join("build").is_dir(),
        "artifacts must survive an aborted clean"
    );
}

/// A failing docs sweep is tolerated; everything else is already removed.
#[test]
fn clean_tolerates_a_failing_docs_sweep() {
    let site = common::SiteBuilder::new()
        .with_source_file("dist/patchbay-2.1.0.tar.gz", "tarball")
        .build();
    let (ctx, exec) = site.context_with(ScriptedExecutor::new().fail_when("make -C docs clean"));

    commands::dispatch("clean", &ctx).expect("docs failures are non-fatal");
    assert!(
        !site.source_path().join("dist").exists(),
        "artifact removal happens regardless of the docs sweep"
    );
    assert_eq!(exec.calls().len(), 2, "the docs sweep was still attempted");
}
