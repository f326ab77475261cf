//! Descriptor file parsing and discovery.

use super::{CommandOverride, Contact, DataFileEntry};
use crate::constants::DESCRIPTOR_FILE_NAME;
use crate::core::DistError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Raw contents of `dist.toml`.
///
/// This is the on-disk shape. It still carries every offered optional field
/// and the full script list; [`super::DistributionBuilder`] decides which of
/// them reach the [`super::Distribution`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DescriptorFile {
    /// `[metadata]` table
    pub metadata: MetadataSection,

    /// `[options]` table: packages and scripts
    #[serde(default)]
    pub options: OptionsSection,

    /// `[[data-files]]` array
    #[serde(default)]
    pub data_files: Vec<DataFileEntry>,

    /// `[command-overrides]` table
    #[serde(default)]
    pub command_overrides: BTreeMap<String, CommandOverride>,

    /// `[build]` defaults
    #[serde(default)]
    pub build: BuildSettings,

    /// `[install]` defaults
    #[serde(default)]
    pub install: InstallSettings,

    /// Directory the descriptor was loaded from
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// `[metadata]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MetadataSection {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub author: Contact,
    #[serde(default)]
    pub maintainer: Contact,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
    /// Offered keyword tags, subject to the capability probe
    #[serde(default)]
    pub keywords: Option<String>,
    /// Offered platform tags, subject to the capability probe
    #[serde(default)]
    pub platforms: Option<String>,
}

/// `[options]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionsSection {
    /// Dotted sub-package identifiers
    #[serde(default)]
    pub packages: Vec<String>,
    /// Scripts, installed on POSIX platforms only
    #[serde(default)]
    pub scripts: Vec<PathBuf>,
}

/// `[build]` table: defaults for the build step.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildSettings {
    /// Staging directory, relative to the descriptor directory
    #[serde(default)]
    pub build_lib: Option<PathBuf>,
    /// Directory the dotted package names are resolved under
    #[serde(default = "default_package_root")]
    pub package_root: PathBuf,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            build_lib: None,
            package_root: default_package_root(),
        }
    }
}

fn default_package_root() -> PathBuf {
    PathBuf::from(".")
}

/// `[install]` table: defaults for the install command.
///
/// Command-line options override these values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InstallSettings {
    #[serde(default)]
    pub prefix: Option<PathBuf>,
    #[serde(default)]
    pub install_lib: Option<PathBuf>,
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub force: Option<bool>,
}

impl DescriptorFile {
    /// Load and parse a descriptor file.
    ///
    /// # Errors
    ///
    /// - The file cannot be read
    /// - The file is not valid TOML or lacks `[metadata] name`/`version`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read descriptor file: {}", path.display()))?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow::anyhow!("Descriptor path has no parent directory"))?;
        let base_dir = if base_dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            base_dir
        };

        Self::from_toml_str(&content, &base_dir).with_context(|| {
            format!(
                "Invalid descriptor file: {}\n\n\
                Common TOML syntax errors:\n\
                - Missing quotes around strings\n\
                - Unmatched brackets [ ] or braces {{ }}\n\
                - Keys placed after a table header they do not belong to",
                path.display()
            )
        })
    }

    /// Parse descriptor content whose relative paths resolve against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`DistError::DescriptorParseError`] on invalid content.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self> {
        let mut file: Self =
            toml::from_str(content).map_err(|e| DistError::DescriptorParseError {
                file: base_dir.join(DESCRIPTOR_FILE_NAME).display().to_string(),
                reason: e.to_string(),
            })?;
        file.base_dir = base_dir.to_path_buf();
        Ok(file)
    }
}

/// Find `dist.toml` by searching up from the current directory.
///
/// # Errors
///
/// Returns [`DistError::DescriptorNotFound`] if no descriptor exists in the
/// current directory or any parent.
pub fn find_descriptor() -> Result<PathBuf> {
    let current = std::env::current_dir()
        .context("Cannot determine current working directory")?;
    find_descriptor_from(current)
}

/// Use `explicit_path` if given, otherwise search from the current directory.
///
/// # Errors
///
/// - Explicit path provided but doesn't exist
/// - No explicit path and no descriptor found via search
pub fn find_descriptor_with_optional(explicit_path: Option<PathBuf>) -> Result<PathBuf> {
    match explicit_path {
        Some(path) => {
            if path.is_file() {
                Ok(path)
            } else {
                Err(DistError::DescriptorNotFound)
                    .with_context(|| format!("No descriptor at {}", path.display()))
            }
        }
        None => find_descriptor(),
    }
}

/// Find `dist.toml` by searching up from `start`.
///
/// # Errors
///
/// Returns [`DistError::DescriptorNotFound`] when the filesystem root is
/// reached without finding one.
pub fn find_descriptor_from(start: PathBuf) -> Result<PathBuf> {
    let mut current = start;

    loop {
        let candidate = current.join(DESCRIPTOR_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!("found descriptor at {}", candidate.display());
            return Ok(candidate);
        }

        if !current.pop() {
            return Err(DistError::DescriptorNotFound.into());
        }
    }
}
