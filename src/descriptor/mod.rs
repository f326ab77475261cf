//! Distribution descriptor: the configuration record handed to the pipeline.
//!
//! A descriptor is read from `dist.toml` (see [`DescriptorFile`]) and turned
//! into an immutable [`Distribution`] by [`DistributionBuilder`]. Building is
//! where the two environment-dependent decisions happen:
//!
//! - the optional metadata fields pass through the capability probe
//!   ([`crate::capability::probe`])
//! - the script list passes through platform selection
//!   ([`crate::utils::platform::select_scripts`])
//!
//! Metadata content itself is never validated. Duplicate package names, odd
//! versions or empty descriptions are passed through to the pipeline as-is.
//!
//! # Descriptor Format (dist.toml)
//!
//! ```toml
//! [metadata]
//! name = "Twisted"
//! version = "0.15.5"
//! description = "Twisted 0.15.5 is a framework to build frameworks"
//! url = "http://twistedmatrix.com/"
//! license = "GNU LGPL"
//! keywords = "internet www tcp framework games"
//! platforms = "win32 posix"
//!
//! [metadata.author]
//! name = "Twisted Matrix Laboratories"
//! email = "twisted-python@twistedmatrix.com"
//!
//! [options]
//! packages = ["twisted", "twisted.im"]
//! scripts = ["bin/twistd", "bin/im"]
//!
//! [[data-files]]
//! target = "twisted/im"
//! files = ["twisted/im/instancemessenger.glade"]
//!
//! [command-overrides]
//! install-data = "lib-relative"
//!
//! [install]
//! prefix = "/opt/twisted"
//! ```

mod descriptor_io;

pub use descriptor_io::{
    BuildSettings, DescriptorFile, InstallSettings, MetadataSection, OptionsSection,
    find_descriptor, find_descriptor_from, find_descriptor_with_optional,
};

use crate::capability::{MetadataCapabilities, OptionalMetadata, probe};
use crate::utils::platform::{Platform, select_scripts};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A person or group responsible for the distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One data-file manifest entry.
///
/// `target` names a directory relative to the install step's target
/// directory; every file in `files` is copied into it under its basename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFileEntry {
    /// Destination subdirectory
    pub target: PathBuf,
    /// Source files, relative to the descriptor directory
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

/// Replacement implementation for a pipeline command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandOverride {
    /// Install data files relative to the library install directory instead
    /// of the shared-data directory.
    LibRelative,
}

/// The immutable distribution descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Distribution {
    /// Distribution name
    pub name: String,
    /// Distribution version
    pub version: String,
    /// One-line summary
    pub description: String,
    /// Long-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// Author contact
    pub author: Contact,
    /// Maintainer contact
    pub maintainer: Contact,
    /// Home page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// License identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Keyword tags, present only when the pipeline reports them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Platform tags, present only when the pipeline reports them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<String>,
    /// Dotted sub-package identifiers
    pub packages: Vec<String>,
    /// Scripts to install (empty on non-POSIX platforms)
    pub scripts: Vec<PathBuf>,
    /// Data-file manifest
    pub data_files: Vec<DataFileEntry>,
    /// Command name to implementation override
    pub command_overrides: BTreeMap<String, CommandOverride>,
    /// Directory package sources live under
    pub package_root: PathBuf,
    /// Directory containing the descriptor; relative sources resolve against it
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl Distribution {
    /// The override registered for `command`, if any.
    #[must_use]
    pub fn command_override(&self, command: &str) -> Option<CommandOverride> {
        self.command_overrides.get(command).copied()
    }

    /// Resolve a descriptor-relative path.
    #[must_use]
    pub fn source_path(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Source directory of a dotted package name.
    #[must_use]
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.base_dir.join(&self.package_root).join(package_path(package))
    }

    /// Base name of the metadata record file, e.g. `Twisted-0.15.5`.
    #[must_use]
    pub fn fullname(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

/// Convert a dotted package name to a relative directory path.
#[must_use]
pub fn package_path(package: &str) -> PathBuf {
    package.split('.').collect()
}

/// Assembles a [`Distribution`] from a descriptor file.
#[derive(Debug, Clone)]
pub struct DistributionBuilder {
    file: DescriptorFile,
    capabilities: MetadataCapabilities,
    platform: Platform,
}

impl DistributionBuilder {
    /// Start from a parsed descriptor file.
    ///
    /// Defaults to no optional-field capabilities and the current platform.
    #[must_use]
    pub fn new(file: DescriptorFile) -> Self {
        Self {
            file,
            capabilities: MetadataCapabilities::none(),
            platform: Platform::current(),
        }
    }

    /// Use the pipeline's capability record for the optional fields.
    #[must_use]
    pub fn capabilities(mut self, capabilities: MetadataCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Select scripts for `platform` instead of the current one.
    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Build the immutable descriptor.
    #[must_use]
    pub fn build(self) -> Distribution {
        let DescriptorFile {
            metadata,
            options,
            data_files,
            command_overrides,
            build,
            base_dir,
            ..
        } = self.file;

        let optional = probe(
            &self.capabilities,
            OptionalMetadata {
                keywords: metadata.keywords,
                platforms: metadata.platforms,
            },
        );
        let scripts = select_scripts(self.platform, &options.scripts);
        if scripts.len() < options.scripts.len() {
            tracing::debug!(
                "skipping {} script(s) on {:?} platform",
                options.scripts.len() - scripts.len(),
                self.platform
            );
        }

        Distribution {
            name: metadata.name,
            version: metadata.version,
            description: metadata.description,
            long_description: metadata.long_description,
            author: metadata.author,
            maintainer: metadata.maintainer,
            url: metadata.url,
            license: metadata.license,
            keywords: optional.keywords,
            platforms: optional.platforms,
            packages: options.packages,
            scripts,
            data_files,
            command_overrides,
            package_root: build.package_root,
            base_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::MetadataVersion;

    const DESCRIPTOR: &str = r#"
[metadata]
name = "Twisted"
version = "0.15.5"
description = "Twisted 0.15.5 is a framework to build frameworks"
keywords = "internet www tcp framework games"
platforms = "win32 posix"

[metadata.maintainer]
name = "Glyph Lefkowitz"
email = "glyph@twistedmatrix.com"

[options]
packages = ["twisted", "twisted.im", "twisted.im"]
scripts = ["bin/manhole", "bin/twistd"]

[[data-files]]
target = "twisted/im"
files = ["twisted/im/instancemessenger.glade"]

[command-overrides]
install-data = "lib-relative"
"#;

    fn file() -> DescriptorFile {
        DescriptorFile::from_toml_str(DESCRIPTOR, Path::new("/src/twisted")).unwrap()
    }

    #[test]
    fn test_build_with_full_capabilities_on_posix() {
        let dist = DistributionBuilder::new(file())
            .capabilities(MetadataVersion::V1_1.capabilities())
            .platform(Platform::Posix)
            .build();

        assert_eq!(dist.name, "Twisted");
        assert_eq!(dist.keywords.as_deref(), Some("internet www tcp framework games"));
        assert_eq!(dist.platforms.as_deref(), Some("win32 posix"));
        assert_eq!(dist.scripts, vec![PathBuf::from("bin/manhole"), PathBuf::from("bin/twistd")]);
        assert_eq!(dist.command_override("install-data"), Some(CommandOverride::LibRelative));
        assert_eq!(dist.maintainer.name.as_deref(), Some("Glyph Lefkowitz"));
    }

    #[test]
    fn test_build_without_capabilities_on_windows() {
        let dist = DistributionBuilder::new(file())
            .capabilities(MetadataVersion::V1_0.capabilities())
            .platform(Platform::Windows)
            .build();

        assert!(dist.keywords.is_none());
        assert!(dist.platforms.is_none());
        assert!(dist.scripts.is_empty());
    }

    #[test]
    fn test_duplicate_packages_pass_through() {
        let dist = DistributionBuilder::new(file()).build();
        assert_eq!(dist.packages, vec!["twisted", "twisted.im", "twisted.im"]);
    }

    #[test]
    fn test_paths_resolve_against_base_dir() {
        let dist = DistributionBuilder::new(file()).build();
        assert_eq!(
            dist.package_dir("twisted.im"),
            Path::new("/src/twisted").join(".").join("twisted").join("im")
        );
        assert_eq!(
            dist.source_path(Path::new("twisted/plugins.tml")),
            Path::new("/src/twisted/twisted/plugins.tml")
        );
        assert_eq!(dist.fullname(), "Twisted-0.15.5");
    }

    #[test]
    fn test_json_omits_unsupported_fields() {
        let dist = DistributionBuilder::new(file()).build();
        let json = serde_json::to_value(&dist).unwrap();
        assert!(json.get("keywords").is_none());
        assert!(json.get("platforms").is_none());
        assert_eq!(json["command-overrides"]["install-data"], "lib-relative");
    }

    #[test]
    fn test_package_path() {
        assert_eq!(package_path("twisted.words.ui.gateways"), Path::new("twisted/words/ui/gateways"));
        assert_eq!(package_path("twisted"), Path::new("twisted"));
    }
}
