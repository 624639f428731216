//! Test and lint pipeline.

use anyhow::Result;

use super::Operation;
use crate::context::Context;
use crate::error::SetupError;
use crate::layout;

/// Run the unit tests under coverage and print the report.
#[derive(Debug, Clone, Copy)]
pub struct Coverage;

impl Operation for Coverage {
    fn name(&self) -> &'static str {
        "coverage"
    }

    fn description(&self) -> &'static str {
        "run unit tests and display code coverage"
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        ctx.log.stage("Running unit tests under coverage");
        ctx.executor.run(
            &ctx.source_root,
            "coverage3",
            &["run", "--source=patchbay", "setup.py", "test"],
        )?;
        ctx.executor.run(&ctx.source_root, "coverage3", &["report"])
    }
}

/// Run the examples embedded in the documentation.
#[derive(Debug, Clone, Copy)]
pub struct DocTest;

impl Operation for DocTest {
    fn name(&self) -> &'static str {
        "doctest"
    }

    fn description(&self) -> &'static str {
        "run documentation tests"
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        ctx.log.stage("Running documentation tests");
        ctx.executor.run(
            &ctx.source_root,
            "make",
            &["-C", layout::DOCS_DIR, "default", "doctest"],
        )
    }
}

/// Lint the Python sources.
#[derive(Debug, Clone, Copy)]
pub struct Lint;

impl Operation for Lint {
    fn name(&self) -> &'static str {
        "lint"
    }

    fn description(&self) -> &'static str {
        "lint Python source code"
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        ctx.log.stage("Running linters");
        ctx.log.info("It may take several seconds...");
        let status = ctx.executor.run_unchecked(
            &ctx.source_root,
            "yala",
            &["setup.py", "patchbay", "tests"],
        )?;
        if status.success {
            ctx.log.info("No linter error found.");
            Ok(())
        } else {
            ctx.log
                .error("Linter check failed. Fix the error(s) above and try again.");
            Err(SetupError::LintFailed.into())
        }
    }
}

/// Full CI pipeline. The order is fixed and the first failure aborts the
/// remaining checks.
#[derive(Debug, Clone, Copy)]
pub struct CiTest;

impl Operation for CiTest {
    fn name(&self) -> &'static str {
        "ci"
    }

    fn description(&self) -> &'static str {
        "run all CI checks: unit and doc tests, linter"
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let checks: [&dyn Operation; 3] = [&Coverage, &DocTest, &Lint];
        for check in checks {
            check.run(ctx)?;
        }
        Ok(())
    }
}
