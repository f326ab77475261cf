//! `distkit build`: stage packages into the build directory.

use super::CliConfig;
use super::common::{cli_path, distribution_for, load_descriptor};
use crate::pipeline::{Pipeline, PipelineSettings};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildCommand {
    /// Staging directory (default: `[build] build-lib`, then `build/lib`
    /// beside the descriptor)
    #[arg(long, value_name = "DIR")]
    pub build_lib: Option<String>,

    /// Restage files even when the staged copy is up to date
    #[arg(short, long)]
    pub force: bool,
}

impl BuildCommand {
    /// Run the build verb.
    ///
    /// # Errors
    ///
    /// Fails on descriptor errors, a missing package directory or a failed copy.
    pub fn execute_with_descriptor_path(
        self,
        descriptor_path: Option<PathBuf>,
        config: &CliConfig,
    ) -> Result<()> {
        let file = load_descriptor(descriptor_path)?;
        let build_lib = match &self.build_lib {
            Some(raw) => Some(cli_path(raw)?),
            None => file.build.build_lib.clone(),
        };

        let pipeline = Pipeline::new(PipelineSettings {
            build_lib,
            force_build: self.force,
            dry_run: config.dry_run,
            ..PipelineSettings::default()
        });
        let dist = distribution_for(file, &pipeline);

        let report = pipeline.build(&dist)?;
        println!(
            "{} {} ({} staged, {} up to date) in {}",
            "Built".green().bold(),
            dist.fullname(),
            report.copied,
            report.skipped,
            pipeline.build_lib(&dist).display()
        );
        Ok(())
    }
}
