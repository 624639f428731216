//! Test doubles and fixtures for exercising operations without
//! subprocesses.
//!
//! Compiled for unit tests and, behind the `test-support` feature, for the
//! integration tests under `tests/`.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context as _, Result, bail};

use crate::context::Context;
use crate::exec::{ExecStatus, Executor};
use crate::layout::InstallTarget;
use crate::logging::Logger;

/// Recording [`Executor`] with scriptable outcomes.
///
/// Calls are rendered as `"program arg1 arg2"` lines for assertions. Every
/// command succeeds unless its rendered line contains a configured failure
/// marker. `which` answers come from a scripted sequence whose last entry
/// repeats; the default is to find everything.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    calls: Mutex<Vec<String>>,
    fail_markers: Vec<String>,
    which_answers: Mutex<Vec<bool>>,
}

impl ScriptedExecutor {
    /// Executor where every command succeeds and every lookup hits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any command whose rendered line contains `marker`.
    #[must_use]
    pub fn fail_when(mut self, marker: &str) -> Self {
        self.fail_markers.push(marker.to_string());
        self
    }

    /// Script the `which` answers; the last one repeats.
    #[must_use]
    pub fn with_which(self, answers: &[bool]) -> Self {
        Self {
            which_answers: Mutex::new(answers.to_vec()),
            ..self
        }
    }

    /// Rendered command lines, in invocation order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, program: &str, args: &[&str]) -> String {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(line.clone());
        }
        line
    }

    fn should_fail(&self, line: &str) -> bool {
        self.fail_markers.iter().any(|marker| line.contains(marker))
    }
}

impl Executor for ScriptedExecutor {
    fn run(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<()> {
        let line = self.record(program, args);
        if self.should_fail(&line) {
            bail!("{program} exited with status 1");
        }
        Ok(())
    }

    fn run_unchecked(&self, _dir: &Path, program: &str, args: &[&str]) -> Result<ExecStatus> {
        let line = self.record(program, args);
        if self.should_fail(&line) {
            Ok(ExecStatus {
                success: false,
                code: Some(1),
            })
        } else {
            Ok(ExecStatus {
                success: true,
                code: Some(0),
            })
        }
    }

    fn which(&self, _program: &str) -> bool {
        let Ok(mut answers) = self.which_answers.lock() else {
            return true;
        };
        if answers.len() > 1 {
            answers.remove(0)
        } else {
            answers.first().copied().unwrap_or(true)
        }
    }
}

/// Context rooted at explicit directories over `executor`, returning the
/// executor handle for assertions. Verbosity off, wheel flag off, no
/// syslog arguments.
#[must_use]
pub fn scripted_context_with(
    source_root: &Path,
    target_root: &Path,
    executor: ScriptedExecutor,
) -> (Context, Arc<ScriptedExecutor>) {
    let exec = Arc::new(executor);
    let ctx = Context {
        source_root: source_root.to_path_buf(),
        target: InstallTarget::new(target_root),
        syslog_args: Vec::new(),
        bdist_wheel: false,
        log: Logger::new(false),
        executor: Arc::clone(&exec) as Arc<dyn Executor>,
    };
    (ctx, exec)
}

/// [`scripted_context_with`] over a default all-succeeding executor.
#[must_use]
pub fn scripted_context(source_root: &Path, target_root: &Path) -> (Context, Arc<ScriptedExecutor>) {
    scripted_context_with(source_root, target_root, ScriptedExecutor::new())
}

const METADATA_PY: &str = "\
\"\"\"Facts about this package.\"\"\"
__version__ = '2.1.0'
__description__ = 'Network patch panel daemon'
__url__ = 'https://github.com/patchbay/patchbay'
__author__ = 'The Patchbay Team'
__author_email__ = 'devel@patchbay.io'
__license__ = 'MIT'
";

const PATCHBAY_CONF_TEMPLATE: &str = "\
[daemon]
pidfile = {{ prefix }}/var/run/patchbay/patchbay.pid
config_dir = {{ prefix }}/etc/patchbay
{% for arg in syslog_args %}syslog_socket = {{ arg }}
{% endfor %}";

const LOGGING_INI_TEMPLATE: &str = "\
[logger_root]
level = INFO
{% if syslog_args %}handlers = console, syslog
{% else %}handlers = console
{% endif %}";

const LOGGING_INI: &str = "\
[logger_root]
level = INFO
handlers = console
";

/// Materialize a miniature patchbay source tree under `root`: the package
/// with its metadata file, configuration templates and plain config, the
/// requirements files, the SASS entry point, a setup shim, and a docs
/// Makefile.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be created.
pub fn populate_source_tree(root: &Path) -> Result<()> {
    let files: &[(&str, &str)] = &[
        ("patchbay/__init__.py", ""),
        ("patchbay/core/__init__.py", ""),
        ("patchbay/core/metadata.py", METADATA_PY),
        ("etc/patchbay/patchbay.conf.template", PATCHBAY_CONF_TEMPLATE),
        ("etc/patchbay/logging.ini.template", LOGGING_INI_TEMPLATE),
        ("etc/patchbay/logging.ini", LOGGING_INI),
        ("requirements/run.in", "aiohttp==3.9.1\njinja2==3.1.3\n"),
        ("requirements/build.in", "libsass==0.23.0\n"),
        ("web-ui-src/sass/main.scss", "body {\n  margin: 0;\n}\n"),
        (
            "setup.py",
            "#!/usr/bin/env python3\nfrom setuptools import setup\n\nsetup()\n",
        ),
        ("docs/Makefile", "clean:\n\t@rm -rf build\n"),
    ];
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
