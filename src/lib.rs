//! distkit - build and install a distribution described by `dist.toml`
//!
//! distkit stages a project's packages into a build directory and installs
//! them, together with scripts, data files and a metadata record, under an
//! installation prefix. A root prefix can relocate the whole install into a
//! staging tree for packaging.
//!
//! # Architecture Overview
//!
//! - A `dist.toml` descriptor is parsed into a [`descriptor::DescriptorFile`]
//!   and frozen into an immutable [`descriptor::Distribution`]
//! - While freezing, optional metadata passes through the capability probe
//!   ([`capability`]) and scripts through platform selection
//!   ([`utils::platform`])
//! - The [`pipeline`] runs the steps in order: build, option resolution,
//!   library, scripts, data files, metadata record
//!
//! The data step can be swapped per descriptor. With
//! `install-data = "lib-relative"` under `[command-overrides]`, data files
//! land relative to the library install directory rather than the shared
//! data directory, so installed packages find their assets next to
//! themselves.
//!
//! # Core Modules
//!
//! - [`capability`] - Metadata versions and the optional-field probe
//! - [`cli`] - Command-line interface
//! - [`constants`] - Default locations and file names
//! - [`core`] - Error types and user-facing error reporting
//! - [`descriptor`] - Descriptor parsing, discovery and the immutable distribution
//! - [`pipeline`] - The build and install steps
//! - [`utils`] - Filesystem helpers and platform handling
//!
//! # Example
//!
//! ```bash
//! distkit install --prefix /opt/pkg --root /tmp/stage
//! ```
//!
//! installs the library tree under `/tmp/stage/opt/pkg/lib`, scripts under
//! `/tmp/stage/opt/pkg/bin`, and the metadata record as
//! `/tmp/stage/opt/pkg/lib/<name>-<version>.pkg-info`.

pub mod capability;
pub mod cli;
pub mod constants;
pub mod core;
pub mod descriptor;
pub mod pipeline;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
