//! Helpers shared by the CLI verbs.

use crate::descriptor::{DescriptorFile, Distribution, DistributionBuilder, find_descriptor_with_optional};
use crate::pipeline::Pipeline;
use crate::utils::platform::resolve_path;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Locate and parse the descriptor.
///
/// # Errors
///
/// Fails if no descriptor is found or it does not parse.
pub fn load_descriptor(descriptor_path: Option<PathBuf>) -> Result<DescriptorFile> {
    let path = find_descriptor_with_optional(descriptor_path)?;
    tracing::debug!("using descriptor {}", path.display());
    DescriptorFile::load(&path)
}

/// Build the immutable distribution with the pipeline's capabilities.
#[must_use]
pub fn distribution_for(file: DescriptorFile, pipeline: &Pipeline) -> Distribution {
    DistributionBuilder::new(file).capabilities(pipeline.capabilities()).build()
}

/// Expand `~` and environment variables in a command-line path and anchor
/// it at the current directory.
///
/// # Errors
///
/// Fails on an unset variable or when the current directory is unavailable.
pub fn cli_path(raw: &str) -> Result<PathBuf> {
    let expanded = resolve_path(raw)?;
    std::path::absolute(&expanded)
        .with_context(|| format!("Cannot resolve path: {}", expanded.display()))
}

