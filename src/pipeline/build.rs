//! Package staging.

use super::{InstallStep, StepReport};
use crate::core::DistError;
use crate::descriptor::{Distribution, package_path};
use crate::utils::fs::{CopyOptions, copy_file, ensure_dir};
use anyhow::{Context, Result};
use std::path::PathBuf;
use walkdir::WalkDir;

/// Copies each listed package's files into the build directory.
///
/// Only the package directory's own regular, non-hidden files are staged;
/// subpackages are staged when they appear in the package list themselves.
#[derive(Debug, Clone)]
pub struct BuildPackages {
    build_lib: PathBuf,
    opts: CopyOptions,
}

impl BuildPackages {
    #[must_use]
    pub const fn new(build_lib: PathBuf, opts: CopyOptions) -> Self {
        Self {
            build_lib,
            opts,
        }
    }

    fn build_package(&self, dist: &Distribution, package: &str) -> Result<StepReport> {
        let src_dir = dist.package_dir(package);
        if !src_dir.is_dir() {
            return Err(DistError::PackageNotFound {
                package: package.to_string(),
                path: src_dir.display().to_string(),
            }
            .into());
        }

        let dst_dir = self.build_lib.join(package_path(package));
        ensure_dir(&dst_dir, &self.opts)?;

        let mut report = StepReport::default();
        for entry in WalkDir::new(&src_dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry
                .with_context(|| format!("Failed to read package directory: {}", src_dir.display()))?;
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            if !entry.file_type().is_file() || hidden {
                continue;
            }

            let dst = dst_dir.join(entry.file_name());
            let outcome = copy_file(entry.path(), &dst, &self.opts)?;
            report.record(dst, outcome);
        }
        Ok(report)
    }
}

impl InstallStep for BuildPackages {
    fn name(&self) -> &'static str {
        "build"
    }

    fn run(&self, dist: &Distribution) -> Result<StepReport> {
        let mut report = StepReport::default();
        for package in &dist.packages {
            report.merge(self.build_package(dist, package)?);
        }
        Ok(report)
    }
}
