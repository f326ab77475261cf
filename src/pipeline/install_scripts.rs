//! Script installation.

use super::{InstallStep, StepReport};
use crate::core::DistError;
use crate::descriptor::Distribution;
use crate::utils::fs::{CopyOptions, CopyOutcome, copy_file, ensure_dir};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Copies the distribution's scripts into the script directory.
///
/// The script list is already empty on non-POSIX platforms, so this step has
/// nothing to do there.
#[derive(Debug, Clone)]
pub struct InstallScripts {
    install_dir: PathBuf,
    opts: CopyOptions,
}

impl InstallScripts {
    #[must_use]
    pub const fn new(install_dir: PathBuf, opts: CopyOptions) -> Self {
        Self {
            install_dir,
            opts,
        }
    }
}

impl InstallStep for InstallScripts {
    fn name(&self) -> &'static str {
        "install-scripts"
    }

    fn run(&self, dist: &Distribution) -> Result<StepReport> {
        let mut report = StepReport::default();
        if dist.scripts.is_empty() {
            return Ok(report);
        }

        ensure_dir(&self.install_dir, &self.opts)?;
        for script in &dist.scripts {
            let src = dist.source_path(script);
            let name = script.file_name().ok_or_else(|| DistError::SourceFileNotFound {
                path: src.display().to_string(),
            })?;
            let dst = self.install_dir.join(name);

            let outcome = copy_file(&src, &dst, &self.opts)?;
            if outcome == CopyOutcome::Copied && !self.opts.dry_run {
                make_executable(&dst)?;
            }
            report.record(dst, outcome);
        }
        Ok(report)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = std::fs::metadata(path)
        .with_context(|| format!("Failed to read permissions of {}", path.display()))?
        .permissions();
    perms.set_mode(crate::constants::SCRIPT_MODE);
    tracing::debug!("changing mode of {} to {:o}", path.display(), crate::constants::SCRIPT_MODE);
    std::fs::set_permissions(path, perms)
        .map_err(|e| DistError::from_io(&e, "change mode", path))
        .with_context(|| format!("Failed to make {} executable", path.display()))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
