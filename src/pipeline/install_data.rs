//! Data-file installation.
//!
//! [`InstallData`] is the generic step: it copies every data-file manifest
//! entry under its own target directory, which defaults to the shared-data
//! directory (`<prefix>/share`). [`DataPathOverride`] is the lib-relative
//! specialization that retargets the same step at the library install
//! directory, so bundled assets land inside the installed package tree and
//! the package can find them relative to itself.

use super::{InstallLocations, InstallStep, ResolvedInstallPaths, StepReport};
use crate::core::DistError;
use crate::descriptor::{DataFileEntry, Distribution};
use crate::utils::fs::{CopyOptions, copy_file, ensure_dir};
use crate::utils::platform::change_root;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// The generic install-data step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallData {
    install_dir: PathBuf,
    root: Option<PathBuf>,
    opts: CopyOptions,
}

impl InstallData {
    /// Target the shared-data directory of a finalized install.
    #[must_use]
    pub fn new(locations: &InstallLocations, dry_run: bool) -> Self {
        Self {
            install_dir: locations.data_dir.clone(),
            root: locations.paths.root.clone(),
            opts: CopyOptions {
                force: locations.paths.force,
                dry_run,
            },
        }
    }

    /// Directory relative manifest targets are joined onto.
    #[must_use]
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    #[must_use]
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    #[must_use]
    pub const fn force(&self) -> bool {
        self.opts.force
    }

    /// Destination directory of a manifest entry.
    ///
    /// Relative targets are joined onto [`InstallData::install_dir`], which is
    /// already rooted. Absolute targets are re-rooted under the root prefix
    /// when one is set.
    #[must_use]
    pub fn destination_dir(&self, target: &Path) -> PathBuf {
        if target.is_absolute() {
            match &self.root {
                Some(root) => change_root(root, target),
                None => target.to_path_buf(),
            }
        } else {
            self.install_dir.join(target)
        }
    }

    fn install_entry(&self, dist: &Distribution, entry: &DataFileEntry) -> Result<StepReport> {
        let dir = self.destination_dir(&entry.target);
        ensure_dir(&dir, &self.opts)?;

        let mut report = StepReport::default();
        for file in &entry.files {
            let src = dist.source_path(file);
            let name = file.file_name().ok_or_else(|| DistError::SourceFileNotFound {
                path: src.display().to_string(),
            })?;
            let dst = dir.join(name);
            let outcome = copy_file(&src, &dst, &self.opts)?;
            report.record(dst, outcome);
        }
        Ok(report)
    }
}

impl InstallStep for InstallData {
    fn name(&self) -> &'static str {
        "install-data"
    }

    fn run(&self, dist: &Distribution) -> Result<StepReport> {
        let mut report = StepReport::default();
        for entry in &dist.data_files {
            let installed = self.install_entry(dist, entry).with_context(|| {
                format!("Failed to install data files into {}", entry.target.display())
            })?;
            report.merge(installed);
        }
        Ok(report)
    }
}

/// Install-data step retargeted at the library install directory.
///
/// Construction takes the install command's resolved library directory, root
/// prefix and force flag explicitly and replaces whatever target the generic
/// step computed. Execution is the generic step's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPathOverride {
    inner: InstallData,
}

impl DataPathOverride {
    #[must_use]
    pub fn new(generic: InstallData, paths: &ResolvedInstallPaths) -> Self {
        if generic.install_dir != paths.install_lib {
            tracing::debug!(
                "redirecting data files from {} to {}",
                generic.install_dir.display(),
                paths.install_lib.display()
            );
        }
        Self {
            inner: InstallData {
                install_dir: paths.install_lib.clone(),
                root: paths.root.clone(),
                opts: CopyOptions {
                    force: paths.force,
                    dry_run: generic.opts.dry_run,
                },
            },
        }
    }

    /// The retargeted generic step.
    #[must_use]
    pub const fn inner(&self) -> &InstallData {
        &self.inner
    }
}

impl InstallStep for DataPathOverride {
    fn name(&self) -> &'static str {
        "install-data (lib-relative)"
    }

    fn run(&self, dist: &Distribution) -> Result<StepReport> {
        self.inner.run(dist)
    }
}
