//! Metadata record written next to the installed packages.
//!
//! The record uses the RFC 822 style `Key: value` layout of PKG-INFO files.
//! Optional fields only appear when the descriptor carries them, which the
//! capability probe guarantees is only the case when the metadata version
//! supports them.

use super::{InstallStep, StepReport};
use crate::capability::MetadataVersion;
use crate::constants::METADATA_RECORD_EXTENSION;
use crate::descriptor::Distribution;
use crate::utils::fs::{CopyOptions, CopyOutcome, atomic_write};
use anyhow::Result;
use std::fmt::Write;
use std::path::PathBuf;

const UNKNOWN: &str = "UNKNOWN";

/// Render the metadata record of `dist` in format `version`.
#[must_use]
pub fn render_metadata(dist: &Distribution, version: MetadataVersion) -> String {
    let mut out = String::new();
    let mut field = |key: &str, value: Option<&str>| {
        let value = value.filter(|v| !v.is_empty()).unwrap_or(UNKNOWN);
        writeln!(out, "{key}: {value}").ok();
    };

    field("Metadata-Version", Some(&version.to_string()));
    field("Name", Some(&dist.name));
    field("Version", Some(&dist.version));
    field("Summary", Some(&dist.description));
    field("Home-page", dist.url.as_deref());
    field("Author", dist.author.name.as_deref());
    field("Author-email", dist.author.email.as_deref());
    if dist.maintainer.name.is_some() {
        field("Maintainer", dist.maintainer.name.as_deref());
    }
    if dist.maintainer.email.is_some() {
        field("Maintainer-email", dist.maintainer.email.as_deref());
    }
    field("License", dist.license.as_deref());
    if let Some(keywords) = &dist.keywords {
        field("Keywords", Some(keywords.as_str()));
    }
    if let Some(platforms) = &dist.platforms {
        for platform in platforms.split_whitespace() {
            field("Platform", Some(platform));
        }
    }
    field("Description", dist.long_description.as_deref().map(str::trim).map(indent).as_deref());

    out
}

/// Continuation lines of a header value are indented by eight spaces.
fn indent(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join("\n        ")
}

/// Writes `<install_lib>/<name>-<version>.pkg-info`.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    install_dir: PathBuf,
    version: MetadataVersion,
    opts: CopyOptions,
}

impl WriteMetadata {
    #[must_use]
    pub const fn new(install_dir: PathBuf, version: MetadataVersion, opts: CopyOptions) -> Self {
        Self {
            install_dir,
            version,
            opts,
        }
    }
}

impl InstallStep for WriteMetadata {
    fn name(&self) -> &'static str {
        "install-metadata"
    }

    fn run(&self, dist: &Distribution) -> Result<StepReport> {
        let target = self
            .install_dir
            .join(format!("{}.{}", dist.fullname(), METADATA_RECORD_EXTENSION));
        atomic_write(&target, render_metadata(dist, self.version).as_bytes(), &self.opts)?;

        let mut report = StepReport::default();
        report.record(target, CopyOutcome::Copied);
        Ok(report)
    }
}
