//! The install pipeline.
//!
//! The pipeline sequences the steps that turn a [`Distribution`] into files on
//! disk. Everything runs in the calling thread, one step after another; a
//! failing step aborts the run and leaves whatever the previous steps wrote.
//!
//! # Steps
//!
//! | Verb      | Steps                                                                 |
//! |-----------|-----------------------------------------------------------------------|
//! | `build`   | [`BuildPackages`]                                                     |
//! | `install` | `build`, then install option resolution, [`InstallLib`], [`InstallScripts`], the data step, [`WriteMetadata`] |
//!
//! The data step is [`InstallData`] unless the descriptor maps the
//! `install-data` command to [`CommandOverride::LibRelative`], in which case
//! [`DataPathOverride`] takes its place.
//!
//! # Examples
//!
//! ```rust,no_run
//! use distkit::descriptor::{DescriptorFile, DistributionBuilder};
//! use distkit::pipeline::{InstallCommand, Pipeline, PipelineSettings};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut pipeline = Pipeline::new(PipelineSettings::default());
//! let file = DescriptorFile::load(Path::new("dist.toml"))?;
//! let dist = DistributionBuilder::new(file).capabilities(pipeline.capabilities()).build();
//!
//! let report = pipeline.install(&dist, &InstallCommand::new().with_prefix("/opt/pkg"))?;
//! println!("installed {} files", report.outputs.len());
//! # Ok(())
//! # }
//! ```

mod build;
mod install;
mod install_data;
mod install_lib;
mod install_scripts;
mod metadata;

pub use build::BuildPackages;
pub use install::{InstallCommand, InstallLocations, ResolvedInstallPaths};
pub use install_data::{DataPathOverride, InstallData};
pub use install_lib::InstallLib;
pub use install_scripts::InstallScripts;
pub use metadata::{WriteMetadata, render_metadata};

use crate::capability::{MetadataCapabilities, MetadataVersion};
use crate::constants::{DEFAULT_BUILD_LIB, INSTALL_DATA_COMMAND};
use crate::core::DistError;
use crate::descriptor::{CommandOverride, Distribution};
use crate::utils::fs::{CopyOptions, CopyOutcome, atomic_write};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A single unit of work in the pipeline.
pub trait InstallStep {
    /// Command name, as used in logs and in `[command-overrides]`.
    fn name(&self) -> &'static str;

    /// Perform the step for `dist`.
    ///
    /// # Errors
    ///
    /// Any I/O failure aborts the step; nothing already written is undone.
    fn run(&self, dist: &Distribution) -> Result<StepReport>;
}

/// What a step (or a whole verb) wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Destination paths, including up-to-date files that were skipped
    pub outputs: Vec<PathBuf>,
    /// Files written
    pub copied: usize,
    /// Files left alone because they were up to date
    pub skipped: usize,
}

impl StepReport {
    /// Note one destination and what happened to it.
    pub fn record(&mut self, path: PathBuf, outcome: CopyOutcome) {
        match outcome {
            CopyOutcome::Copied => self.copied += 1,
            CopyOutcome::Skipped => self.skipped += 1,
        }
        self.outputs.push(path);
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: Self) {
        self.outputs.extend(other.outputs);
        self.copied += other.copied;
        self.skipped += other.skipped;
    }
}

/// Pipeline-wide settings, fixed for the lifetime of a [`Pipeline`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Metadata format written to the metadata record
    pub metadata_version: MetadataVersion,
    /// Log writes instead of performing them
    pub dry_run: bool,
    /// Staging directory; relative paths resolve against the descriptor directory
    pub build_lib: Option<PathBuf>,
    /// Rebuild staged files even when up to date
    pub force_build: bool,
}

/// The install pipeline.
#[derive(Debug)]
pub struct Pipeline {
    settings: PipelineSettings,
    install: Option<InstallLocations>,
}

impl Pipeline {
    #[must_use]
    pub const fn new(settings: PipelineSettings) -> Self {
        Self {
            settings,
            install: None,
        }
    }

    /// Which optional metadata fields this pipeline reports.
    #[must_use]
    pub fn capabilities(&self) -> MetadataCapabilities {
        self.settings.metadata_version.capabilities()
    }

    #[must_use]
    pub const fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Staging directory for `dist`.
    #[must_use]
    pub fn build_lib(&self, dist: &Distribution) -> PathBuf {
        match &self.settings.build_lib {
            Some(dir) => dist.base_dir.join(dir),
            None => dist.base_dir.join(DEFAULT_BUILD_LIB),
        }
    }

    /// Resolve the install command's options. Later calls replace earlier ones.
    pub fn finalize_install(&mut self, cmd: &InstallCommand) -> &InstallLocations {
        self.install.insert(cmd.finalize())
    }

    /// The finalized install locations.
    ///
    /// # Errors
    ///
    /// [`DistError::ConfigurationOrdering`] if [`Pipeline::finalize_install`]
    /// has not run.
    pub fn install_locations(&self) -> Result<&InstallLocations, DistError> {
        self.install.as_ref().ok_or(DistError::ConfigurationOrdering)
    }

    /// Library directory, root prefix and force flag of the finalized install.
    ///
    /// # Errors
    ///
    /// [`DistError::ConfigurationOrdering`] if [`Pipeline::finalize_install`]
    /// has not run.
    pub fn resolved_install_paths(&self) -> Result<&ResolvedInstallPaths, DistError> {
        self.install_locations().map(|locations| &locations.paths)
    }

    /// The data step registered for `dist`.
    ///
    /// # Errors
    ///
    /// [`DistError::ConfigurationOrdering`] if the install options are not
    /// finalized yet.
    pub fn install_data_step(&self, dist: &Distribution) -> Result<Box<dyn InstallStep>> {
        let locations = self.install_locations()?;
        let generic = InstallData::new(locations, self.settings.dry_run);

        let step: Box<dyn InstallStep> = match dist.command_override(INSTALL_DATA_COMMAND) {
            Some(CommandOverride::LibRelative) => {
                let paths = self.resolved_install_paths()?;
                Box::new(DataPathOverride::new(generic, paths))
            }
            None => Box::new(generic),
        };
        Ok(step)
    }

    /// Stage every package into the build directory.
    ///
    /// # Errors
    ///
    /// Fails on a missing package directory or any copy failure.
    pub fn build(&self, dist: &Distribution) -> Result<StepReport> {
        warn_unknown_overrides(dist);
        let step = BuildPackages::new(
            self.build_lib(dist),
            CopyOptions {
                force: self.settings.force_build,
                dry_run: self.settings.dry_run,
            },
        );
        run_step(&step, dist)
    }

    /// Build, resolve install options, then install libraries, scripts, data
    /// files and the metadata record.
    ///
    /// # Errors
    ///
    /// The first failing step aborts the install.
    pub fn install(&mut self, dist: &Distribution, cmd: &InstallCommand) -> Result<StepReport> {
        self.build(dist)?;

        let locations = self.finalize_install(cmd).clone();
        let opts = CopyOptions {
            force: locations.paths.force,
            dry_run: self.settings.dry_run,
        };

        let steps: Vec<Box<dyn InstallStep>> = vec![
            Box::new(InstallLib::new(self.build_lib(dist), locations.paths.install_lib.clone(), opts)),
            Box::new(InstallScripts::new(locations.scripts_dir.clone(), opts)),
            self.install_data_step(dist)?,
            Box::new(WriteMetadata::new(
                locations.paths.install_lib.clone(),
                self.settings.metadata_version,
                opts,
            )),
        ];

        let mut report = StepReport::default();
        for step in &steps {
            report.merge(run_step(step.as_ref(), dist)?);
        }

        if let Some(record) = &cmd.record {
            write_record(record, &report.outputs, locations.paths.root.as_deref(), &opts)?;
        }

        Ok(report)
    }
}

fn run_step(step: &dyn InstallStep, dist: &Distribution) -> Result<StepReport> {
    tracing::info!("running {}", step.name());
    let report = step.run(dist).with_context(|| format!("{} failed", step.name()))?;
    tracing::debug!(
        "{}: {} copied, {} up to date",
        step.name(),
        report.copied,
        report.skipped
    );
    Ok(report)
}

fn warn_unknown_overrides(dist: &Distribution) {
    for name in dist.command_overrides.keys() {
        if name != INSTALL_DATA_COMMAND {
            tracing::warn!("ignoring override for unknown command '{name}'");
        }
    }
}

/// Write the installed paths, one per line, with the root prefix stripped.
fn write_record(
    record: &Path,
    outputs: &[PathBuf],
    root: Option<&Path>,
    opts: &CopyOptions,
) -> Result<()> {
    let mut content = String::new();
    for output in outputs {
        let shown = match root {
            Some(root) => match output.strip_prefix(root) {
                Ok(rest) => Path::new(std::path::MAIN_SEPARATOR_STR).join(rest),
                Err(_) => output.clone(),
            },
            None => output.clone(),
        };
        content.push_str(&shown.to_string_lossy());
        content.push('\n');
    }
    atomic_write(record, content.as_bytes(), opts)
        .with_context(|| format!("Failed to write install record: {}", record.display()))
}

#[cfg(test)]
mod tests;
