//! Metadata capability probing.
//!
//! Different metadata format versions understand different optional fields.
//! Handing the pipeline a field it does not know corrupts the metadata record,
//! so optional fields are only carried onto the [`Distribution`] when the
//! pipeline's [`MetadataCapabilities`] declare them.
//!
//! [`Distribution`]: crate::descriptor::Distribution

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Optional metadata fields whose support depends on the metadata version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionalField {
    /// Space-separated keyword tags
    Keywords,
    /// Space-separated supported platform tags
    Platforms,
}

impl OptionalField {
    /// All optional fields, in the order they are probed.
    pub const ALL: [Self; 2] = [Self::Keywords, Self::Platforms];
}

/// Metadata format version the pipeline writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MetadataVersion {
    /// Baseline format without optional fields
    #[serde(rename = "1.0")]
    V1_0,
    /// Adds keywords and platforms
    #[serde(rename = "1.1")]
    #[default]
    V1_1,
}

impl MetadataVersion {
    /// The capability record for this version.
    #[must_use]
    pub fn capabilities(self) -> MetadataCapabilities {
        match self {
            Self::V1_0 => MetadataCapabilities::none(),
            Self::V1_1 => MetadataCapabilities::new(OptionalField::ALL),
        }
    }
}

impl fmt::Display for MetadataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1_0 => f.write_str("1.0"),
            Self::V1_1 => f.write_str("1.1"),
        }
    }
}

impl FromStr for MetadataVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1.0" => Ok(Self::V1_0),
            "1.1" => Ok(Self::V1_1),
            other => Err(format!("unsupported metadata version '{other}' (expected 1.0 or 1.1)")),
        }
    }
}

/// Typed description of which optional metadata fields a pipeline reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataCapabilities {
    supported: Vec<OptionalField>,
}

impl MetadataCapabilities {
    /// Capabilities declaring exactly `fields`.
    pub fn new(fields: impl IntoIterator<Item = OptionalField>) -> Self {
        let mut supported: Vec<OptionalField> = Vec::new();
        for field in fields {
            if !supported.contains(&field) {
                supported.push(field);
            }
        }
        Self {
            supported,
        }
    }

    /// Capabilities declaring no optional fields.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the pipeline reports `field`.
    #[must_use]
    pub fn supports(&self, field: OptionalField) -> bool {
        self.supported.contains(&field)
    }
}

/// Literal values the descriptor offers for the optional fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalMetadata {
    /// Keyword tags
    pub keywords: Option<String>,
    /// Platform tags
    pub platforms: Option<String>,
}

/// Keep only the offered fields the pipeline supports.
///
/// A field is either carried over verbatim or omitted entirely; it is never
/// replaced by an empty value. Absence of a capability is a normal outcome.
#[must_use]
pub fn probe(caps: &MetadataCapabilities, offered: OptionalMetadata) -> OptionalMetadata {
    let mut accepted = OptionalMetadata::default();

    for field in OptionalField::ALL {
        let (slot, value) = match field {
            OptionalField::Keywords => (&mut accepted.keywords, &offered.keywords),
            OptionalField::Platforms => (&mut accepted.platforms, &offered.platforms),
        };
        match (caps.supports(field), value) {
            (true, Some(value)) => *slot = Some(value.clone()),
            (false, Some(_)) => {
                tracing::debug!("metadata field {field:?} not supported by pipeline, omitting");
            }
            (_, None) => {}
        }
    }

    accepted
}
