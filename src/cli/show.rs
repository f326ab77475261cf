//! `distkit show`: print the distribution as the pipeline would report it.

use super::CliConfig;
use super::common::{distribution_for, load_descriptor};
use crate::capability::MetadataVersion;
use crate::descriptor::Distribution;
use crate::pipeline::{Pipeline, PipelineSettings, render_metadata};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowCommand {
    /// Print JSON instead of PKG-INFO text
    #[arg(long)]
    pub json: bool,

    /// Metadata format to report (1.0 or 1.1)
    #[arg(long, value_name = "VERSION")]
    pub metadata_version: Option<MetadataVersion>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct ShowOutput<'a> {
    metadata_version: MetadataVersion,
    #[serde(flatten)]
    distribution: &'a Distribution,
}

impl ShowCommand {
    /// Run the show verb.
    ///
    /// # Errors
    ///
    /// Fails on descriptor errors.
    pub fn execute_with_descriptor_path(
        self,
        descriptor_path: Option<PathBuf>,
        _config: &CliConfig,
    ) -> Result<()> {
        let file = load_descriptor(descriptor_path)?;
        let version = self.metadata_version.unwrap_or_default();
        let pipeline = Pipeline::new(PipelineSettings {
            metadata_version: version,
            ..PipelineSettings::default()
        });
        let dist = distribution_for(file, &pipeline);

        if self.json {
            let output = ShowOutput {
                metadata_version: version,
                distribution: &dist,
            };
            let json = serde_json::to_string_pretty(&output)
                .context("Failed to serialize distribution")?;
            println!("{json}");
        } else {
            print!("{}", render_metadata(&dist, version));
        }
        Ok(())
    }
}
