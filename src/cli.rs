//! Command-line surface. Subcommands mirror the operation registry one to
//! one; [`Command::operation_name`] is the bridge between the two.

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the patchbay setup orchestrator.
#[derive(Parser, Debug)]
#[command(
    name = "patchbay-setup",
    about = "Build and installation orchestrator for the patchbay daemon",
    version = crate::version()
)]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Flags shared by every operation.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the patchbay source tree location
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,

    /// Build a binary wheel instead of a source install
    #[arg(long = "bdist-wheel", global = true)]
    pub bdist_wheel: bool,
}

/// Available subcommands, one per registered operation.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
#[command(rename_all = "snake_case")]
pub enum Command {
    /// Force CSS (re)build
    BuildSass,
    /// Clean build, dist, pyc and egg from package and docs
    Clean,
    /// Run all CI checks: unit and doc tests, linter
    Ci,
    /// Run unit tests and display code coverage
    Coverage,
    /// Install in develop mode with symlinked configuration
    Develop,
    /// Run documentation tests
    Doctest,
    /// Prepare files to be packed
    EggInfo,
    /// Install the package and its configuration files
    Install,
    /// Lint Python source code
    Lint,
}

impl Command {
    /// Registry name of the selected operation.
    #[must_use]
    pub const fn operation_name(self) -> &'static str {
        match self {
            Self::BuildSass => "build_sass",
            Self::Clean => "clean",
            Self::Ci => "ci",
            Self::Coverage => "coverage",
            Self::Develop => "develop",
            Self::Doctest => "doctest",
            Self::EggInfo => "egg_info",
            Self::Install => "install",
            Self::Lint => "lint",
        }
    }
}
