//! Library installation: the staged build tree goes into the library directory.

use super::{InstallStep, StepReport};
use crate::descriptor::Distribution;
use crate::utils::fs::{CopyOptions, copy_tree};
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct InstallLib {
    build_lib: PathBuf,
    install_dir: PathBuf,
    opts: CopyOptions,
}

impl InstallLib {
    #[must_use]
    pub const fn new(build_lib: PathBuf, install_dir: PathBuf, opts: CopyOptions) -> Self {
        Self {
            build_lib,
            install_dir,
            opts,
        }
    }
}

impl InstallStep for InstallLib {
    fn name(&self) -> &'static str {
        "install-lib"
    }

    fn run(&self, dist: &Distribution) -> Result<StepReport> {
        let mut report = StepReport::default();
        if dist.packages.is_empty() {
            return Ok(report);
        }
        if self.opts.dry_run && !self.build_lib.is_dir() {
            tracing::warn!(
                "{} does not exist (dry run did not build it); nothing to install",
                self.build_lib.display()
            );
            return Ok(report);
        }

        for (output, outcome) in copy_tree(&self.build_lib, &self.install_dir, &self.opts)? {
            report.record(output, outcome);
        }
        Ok(report)
    }
}
