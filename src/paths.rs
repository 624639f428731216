//! Path provisioning under the install target.

use anyhow::{Context as _, Result};

use crate::layout::InstallTarget;

/// Ensure the configuration directory exists under `target`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_config_dir(target: &InstallTarget) -> Result<()> {
    let dir = target.config_dir();
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))
}

/// Ensure the runtime (PID) directory exists under `target`.
///
/// On the system root the directory gets shared-temp permissions so the
/// daemon can drop its PID file after shedding privileges. Virtualenv
/// targets keep default modes.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or its permissions
/// cannot be set.
pub fn ensure_runtime_dir(target: &InstallTarget) -> Result<()> {
    let dir = target.runtime_dir();
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    if target.is_system_root() {
        set_shared_tmp_mode(&dir)?;
    }
    Ok(())
}

#[cfg(unix)]
fn set_shared_tmp_mode(dir: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt as _;
    std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o1777))
        .with_context(|| format!("setting permissions on {}", dir.display()))
}

#[cfg(not(unix))]
fn set_shared_tmp_mode(_dir: &std::path::Path) -> Result<()> {
    Ok(())
}
