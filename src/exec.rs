//! Subprocess execution.
//!
//! Every external step (pip, pysassc, coverage3, make, yala, delegated
//! `setup.py` steps) runs through the [`Executor`] trait so operations stay
//! testable without spawning processes. The production implementation
//! inherits stdio: the wrapped tools stream their own progress and the
//! orchestrator only observes the exit status.

use std::fmt;
use std::path::Path;
use std::process::Command;

use anyhow::{Context as _, Result, bail};

/// Exit status of a best-effort run.
#[derive(Debug, Clone, Copy)]
pub struct ExecStatus {
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, when the process exited normally.
    pub code: Option<i32>,
}

/// Runs external programs on behalf of operations.
pub trait Executor: fmt::Debug + Send + Sync {
    /// Run `program` with `args` in `dir`, treating a non-zero exit as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned or exits
    /// unsuccessfully.
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()>;

    /// Run `program` with `args` in `dir`, reporting the exit status
    /// instead of failing on it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the program cannot be spawned.
    fn run_unchecked(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecStatus>;

    /// Whether `program` resolves on the search path.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    fn status(dir: &Path, program: &str, args: &[&str]) -> Result<ExecStatus> {
        tracing::debug!(program, ?args, dir = %dir.display(), "spawning");
        let status = Command::new(program)
            .args(args)
            .current_dir(dir)
            .status()
            .with_context(|| format!("failed to run {program}"))?;
        Ok(ExecStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}

impl Executor for SystemExecutor {
    fn run(&self, dir: &Path, program: &str, args: &[&str]) -> Result<()> {
        let status = Self::status(dir, program, args)?;
        if !status.success {
            match status.code {
                Some(code) => bail!("{program} exited with status {code}"),
                None => bail!("{program} was terminated by a signal"),
            }
        }
        Ok(())
    }

    fn run_unchecked(&self, dir: &Path, program: &str, args: &[&str]) -> Result<ExecStatus> {
        Self::status(dir, program, args)
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
