//! Console output and diagnostics.
//!
//! User-facing progress goes through [`Logger`]: plain colored lines on
//! stdout, warnings and errors on stderr. Internal diagnostics (spawned
//! commands, rendered files, skipped removals) are `tracing` events,
//! enabled with `RUST_LOG` via [`init_tracing`] and kept off stdout so
//! they never interleave with operation progress.

use std::io::Write as _;

use tracing_subscriber::EnvFilter;

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Console logger for user-facing progress.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    verbose: bool,
}

impl Logger {
    /// Create a logger. `verbose` enables debug lines.
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Whether debug lines are emitted.
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        self.verbose
    }

    /// Announce a stage of work.
    pub fn stage(self, msg: &str) {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{BOLD}==> {msg}{RESET}").ok();
    }

    /// Report routine progress.
    pub fn info(self, msg: &str) {
        let mut out = std::io::stdout().lock();
        writeln!(out, "    {msg}").ok();
    }

    /// Report detail, shown only in verbose mode.
    pub fn debug(self, msg: &str) {
        if self.verbose {
            let mut out = std::io::stdout().lock();
            writeln!(out, "    {DIM}{msg}{RESET}").ok();
        }
    }

    /// Report a recoverable problem.
    pub fn warn(self, msg: &str) {
        let mut err = std::io::stderr().lock();
        writeln!(err, "{YELLOW}warning:{RESET} {msg}").ok();
    }

    /// Report a failure.
    pub fn error(self, msg: &str) {
        let mut err = std::io::stderr().lock();
        writeln!(err, "{RED}error:{RESET} {msg}").ok();
    }
}

/// Install the global tracing subscriber.
///
/// Filtered by `RUST_LOG`, defaulting to `warn`. Call once, from `main`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
