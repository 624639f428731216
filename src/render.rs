//! Configuration template rendering.
//!
//! Templates ship next to the configuration they produce and use Jinja
//! syntax: `{{ prefix }}` for the install prefix and `{% if %}`/`{% for %}`
//! over `syslog_args` for the log-socket lines. Rendering always overwrites
//! the output; develop-mode symlinking is where existing files are spared.

use std::path::Path;

use anyhow::{Context as _, Result};
use minijinja::Environment;
use serde::Serialize;

use crate::error::SetupError;
use crate::layout::{self, InstallTarget};
use crate::paths;

/// Variables available to every configuration template.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    /// Install prefix interpolated into paths. One trailing separator is
    /// stripped before rendering so the system root becomes empty and
    /// templates can write `{{ prefix }}/etc/patchbay`.
    pub prefix: String,
    /// Log-socket arguments, in order. Empty means the platform has no
    /// syslog socket and templates omit the line.
    pub syslog_args: Vec<String>,
}

impl RenderContext {
    /// Context rendering under `prefix` with the given socket arguments.
    #[must_use]
    pub fn new(prefix: impl Into<String>, syslog_args: Vec<String>) -> Self {
        Self {
            prefix: prefix.into(),
            syslog_args,
        }
    }

    fn normalized(&self) -> Self {
        let prefix = self
            .prefix
            .strip_suffix('/')
            .unwrap_or(&self.prefix)
            .to_string();
        Self {
            prefix,
            syslog_args: self.syslog_args.clone(),
        }
    }
}

/// Render every template in `templates`, read relative to `source_root`,
/// into `destination` with the template suffix stripped from each output
/// name. Existing outputs are overwritten; files are independent and there
/// is no rollback.
///
/// # Errors
///
/// Returns [`SetupError::NotATemplate`] for a manifest entry without the
/// template suffix, and I/O or rendering errors for unreadable templates,
/// invalid syntax, or unwritable outputs.
pub fn render_set(
    source_root: &Path,
    templates: &[&str],
    destination: &Path,
    vars: &RenderContext,
    target: &InstallTarget,
) -> Result<()> {
    let vars = vars.normalized();
    paths::ensure_config_dir(target)?;

    let env = Environment::new();
    for rel in templates {
        let Some(output_rel) = rel.strip_suffix(layout::TEMPLATE_SUFFIX) else {
            return Err(SetupError::NotATemplate((*rel).to_string()).into());
        };
        let source = source_root.join(rel);
        let text = std::fs::read_to_string(&source)
            .with_context(|| format!("reading template {}", source.display()))?;
        let rendered = env
            .render_str(&text, &vars)
            .with_context(|| format!("rendering {rel}"))?;

        let output = destination.join(output_rel);
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&output, &rendered)
            .with_context(|| format!("writing {}", output.display()))?;
        tracing::debug!(template = rel, output = %output.display(), "rendered");
    }
    Ok(())
}
