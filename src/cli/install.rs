//! `distkit install`: build and install the distribution.
//!
//! Options left unset here fall back to the descriptor's `[install]` table,
//! then to the built-in defaults (`/usr/local`, `<prefix>/lib`, ...).
//!
//! # Examples
//!
//! ```bash
//! # Install into the default prefix
//! distkit install
//!
//! # Stage a relocatable tree for packaging
//! distkit install --prefix /opt/pkg --root /tmp/stage --record installed.txt
//!
//! # Reinstall everything, including up-to-date files
//! distkit install --force
//! ```

use super::CliConfig;
use super::common::{cli_path, distribution_for, load_descriptor};
use crate::capability::MetadataVersion;
use crate::pipeline::{self, Pipeline, PipelineSettings};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallCommand {
    /// Installation prefix (default: /usr/local)
    #[arg(long, value_name = "DIR")]
    pub prefix: Option<String>,

    /// Library directory (default: `<prefix>/lib`)
    #[arg(long, value_name = "DIR")]
    pub install_lib: Option<String>,

    /// Install everything under this directory as if it were the filesystem root
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// Overwrite files even when the installed copy is up to date
    #[arg(short, long)]
    pub force: bool,

    /// Write the list of installed files to FILE
    #[arg(long, value_name = "FILE")]
    pub record: Option<String>,

    /// Metadata format of the metadata record (1.0 or 1.1)
    #[arg(long, value_name = "VERSION")]
    pub metadata_version: Option<MetadataVersion>,
}

impl InstallCommand {
    /// Resolve command-line paths into the pipeline's install command.
    fn to_install_options(&self) -> Result<pipeline::InstallCommand> {
        let mut cmd = pipeline::InstallCommand::new().with_force(self.force);
        if let Some(raw) = &self.prefix {
            cmd = cmd.with_prefix(cli_path(raw)?);
        }
        if let Some(raw) = &self.install_lib {
            cmd = cmd.with_install_lib(cli_path(raw)?);
        }
        if let Some(raw) = &self.root {
            cmd = cmd.with_root(cli_path(raw)?);
        }
        if let Some(raw) = &self.record {
            cmd = cmd.with_record(cli_path(raw)?);
        }
        Ok(cmd)
    }

    /// Run the install verb.
    ///
    /// # Errors
    ///
    /// Fails on descriptor errors and on the first failing pipeline step.
    pub fn execute_with_descriptor_path(
        self,
        descriptor_path: Option<PathBuf>,
        config: &CliConfig,
    ) -> Result<()> {
        let file = load_descriptor(descriptor_path)?;
        let cmd = self.to_install_options()?.merged_with(&file.install, &file.base_dir);

        let mut pipeline = Pipeline::new(PipelineSettings {
            metadata_version: self.metadata_version.unwrap_or_default(),
            dry_run: config.dry_run,
            build_lib: file.build.build_lib.clone(),
            force_build: cmd.force,
        });
        let dist = distribution_for(file, &pipeline);

        let report = pipeline.install(&dist, &cmd)?;
        let locations = pipeline.install_locations()?;

        let verb = if config.dry_run {
            "Would install"
        } else {
            "Installed"
        };
        println!("\n{} {}", verb.green().bold(), dist.fullname().bold());
        println!("  {} file(s) written, {} up to date", report.copied, report.skipped);
        println!("  library: {}", locations.paths.install_lib.display());
        if !dist.scripts.is_empty() {
            println!("  scripts: {}", locations.scripts_dir.display());
        }
        if let Some(record) = &cmd.record {
            println!("  record:  {}", record.display());
        }
        Ok(())
    }
}
