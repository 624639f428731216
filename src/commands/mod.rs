//! Named operations and their registry.
//!
//! Each operation is a small unit struct implementing [`Operation`]. The
//! registry fixes the set and its order; `dispatch` runs one by name so the
//! CLI layer stays a thin mapping from subcommand to operation.

pub mod assets;
pub mod checks;
pub mod clean;
pub mod develop;
pub mod egg_info;
pub mod install;

use anyhow::{Result, bail};

use crate::context::Context;

/// A named, described unit of work dispatched from the CLI.
pub trait Operation {
    /// Stable name used for dispatch.
    fn name(&self) -> &'static str;

    /// One-line description for operators.
    fn description(&self) -> &'static str;

    /// Execute against `ctx`.
    ///
    /// # Errors
    ///
    /// Returns an error when a delegated step, file operation, or check
    /// fails; the failure aborts the operation.
    fn run(&self, ctx: &Context) -> Result<()>;
}

/// Every operation, in registry order.
#[must_use]
pub fn registry() -> Vec<Box<dyn Operation>> {
    vec![
        Box::new(assets::BuildSass),
        Box::new(clean::Clean),
        Box::new(checks::CiTest),
        Box::new(checks::Coverage),
        Box::new(develop::DevelopInstall),
        Box::new(checks::DocTest),
        Box::new(egg_info::EggInfo),
        Box::new(install::SystemInstall),
        Box::new(checks::Lint),
    ]
}

/// Run the operation registered under `name`.
///
/// # Errors
///
/// Fails for names missing from the registry and propagates operation
/// failures.
pub fn dispatch(name: &str, ctx: &Context) -> Result<()> {
    let Some(op) = registry().into_iter().find(|op| op.name() == name) else {
        bail!("unknown operation: {name}");
    };
    tracing::debug!(operation = op.name(), "dispatching");
    op.run(ctx)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn registry_has_nine_operations() {
        assert_eq!(registry().len(), 9);
    }

    #[test]
    fn registry_names_are_unique_and_non_empty() {
        let mut seen = std::collections::HashSet::new();
        for op in registry() {
            assert!(!op.name().is_empty());
            assert!(seen.insert(op.name()), "duplicate name {}", op.name());
        }
    }

    #[test]
    fn every_operation_is_described() {
        for op in registry() {
            assert!(
                !op.description().is_empty(),
                "{} lacks a description",
                op.name()
            );
        }
    }

    #[test]
    fn dispatch_rejects_unknown_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (ctx, exec) = test_support::scripted_context(dir.path(), dir.path());
        let err = dispatch("bogus", &ctx).expect_err("unknown name");
        assert!(err.to_string().contains("unknown operation: bogus"));
        assert!(exec.calls().is_empty(), "nothing may run for unknown names");
    }

    #[test]
    fn dispatch_runs_the_named_operation() {
        let dir = tempfile::tempdir().expect("tempdir");
        test_support::populate_source_tree(dir.path()).expect("fixture");
        let (ctx, exec) = test_support::scripted_context(dir.path(), dir.path());

        dispatch("doctest", &ctx).expect("doctest runs");
        assert_eq!(exec.calls(), vec!["make -C docs default doctest".to_string()]);
    }
}
