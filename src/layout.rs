//! Source-tree and install-target layout.
//!
//! Every path the orchestrator touches is declared here: the configuration
//! manifests shipped in the source tree, the directories provisioned under
//! the install target, and the web-UI asset pipeline endpoints.

use std::path::{Path, PathBuf};

/// Suffix marking a configuration file as a template.
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Configuration templates, relative to the source root. Rendering strips
/// the suffix.
pub const TEMPLATE_FILES: &[&str] = &[
    "etc/patchbay/patchbay.conf.template",
    "etc/patchbay/logging.ini.template",
];

/// Plain configuration files shipped verbatim, relative to the source root.
pub const ETC_FILES: &[&str] = &["etc/patchbay/logging.ini"];

/// Rendered-configuration directory, relative to the install target.
pub const CONFIG_DIR: &str = "etc/patchbay";

/// PID-file directory, relative to the install target.
pub const RUNTIME_DIR: &str = "var/run/patchbay";

/// Python package directory expected at the source root.
pub const PACKAGE_DIR: &str = "patchbay";

/// Declarative metadata file inside the package.
pub const METADATA_FILE: &str = "patchbay/core/metadata.py";

/// SASS entry point for the web UI.
pub const SASS_ENTRY: &str = "web-ui-src/sass/main.scss";

/// Compiled stylesheet, relative to the source root. The compiler writes a
/// `.map` sibling next to it.
pub const CSS_OUTPUT: &str = "patchbay/web-ui/static/css/style.css";

/// Pinned runtime requirements file.
pub const RUN_REQUIREMENTS: &str = "requirements/run.in";

/// Pinned build-time requirements file; provides the CSS compiler.
pub const BUILD_REQUIREMENTS: &str = "requirements/build.in";

/// Sphinx documentation directory.
pub const DOCS_DIR: &str = "docs";

/// Root directory that configuration and runtime paths are installed under.
///
/// Inside an active virtualenv this is the environment root, keeping the
/// install contained; otherwise it is the system root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    root: PathBuf,
}

impl InstallTarget {
    /// Target rooted at an explicit directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the target from the environment: an active, non-empty
    /// `VIRTUAL_ENV` wins, otherwise the system root.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var("VIRTUAL_ENV") {
            Ok(venv) if !venv.is_empty() => Self::new(venv),
            _ => Self::new("/"),
        }
    }

    /// The target root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the target is the system root rather than a virtualenv.
    #[must_use]
    pub fn is_system_root(&self) -> bool {
        self.root.as_path() == Path::new("/")
    }

    /// Directory rendered configuration is placed in.
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    /// Directory the daemon drops PID files in.
    #[must_use]
    pub fn runtime_dir(&self) -> PathBuf {
        self.root.join(RUNTIME_DIR)
    }

    /// The root as a template-facing string.
    #[must_use]
    pub fn prefix(&self) -> String {
        self.root.display().to_string()
    }
}

/// Log-socket arguments for rendered daemon configuration.
///
/// Mirrors what the daemon probes at runtime: when the platform syslog
/// socket exists it is passed through to the config, otherwise the socket
/// line is omitted entirely.
#[must_use]
pub fn detect_syslog_args() -> Vec<String> {
    syslog_args_at(Path::new("/dev/log"))
}

fn syslog_args_at(socket: &Path) -> Vec<String> {
    if socket.exists() {
        vec![socket.display().to_string()]
    } else {
        Vec::new()
    }
}
