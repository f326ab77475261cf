//! Platform detection and install-root path arithmetic
//!
//! This module encapsulates the few places where the installer's behavior
//! depends on the host operating system:
//!
//! - [`Platform`] classifies the OS family, and [`select_scripts`] decides
//!   from it whether the distribution's executables are installed at all.
//! - [`change_root`] relocates an install location under an alternate
//!   filesystem root for staged installs.
//! - [`resolve_path`] expands `~` and environment variables in paths given on
//!   the command line.
//!
//! # Examples
//!
//! ```rust,no_run
//! use distkit::utils::platform::{Platform, change_root, select_scripts};
//! use std::path::{Path, PathBuf};
//!
//! let scripts = vec![PathBuf::from("bin/twistd")];
//! let selected = select_scripts(Platform::current(), &scripts);
//!
//! let staged = change_root(Path::new("/tmp/stage"), Path::new("/opt/pkg/lib"));
//! assert_eq!(staged, PathBuf::from("/tmp/stage/opt/pkg/lib"));
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Operating-system family the installer is running on.
///
/// Only the distinction between POSIX-like systems and everything else
/// matters to the installer: bundled scripts rely on shebang lines and
/// permission bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Unix-like systems (Linux, macOS, BSD)
    Posix,
    /// Windows
    Windows,
    /// Any other family (e.g. wasm targets)
    Other,
}

impl Platform {
    /// Classify an OS family string as reported by [`std::env::consts::FAMILY`].
    #[must_use]
    pub fn from_family(family: &str) -> Self {
        match family {
            "unix" => Self::Posix,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }

    /// The platform this binary was compiled for.
    #[must_use]
    pub fn current() -> Self {
        Self::from_family(std::env::consts::FAMILY)
    }

    /// Whether scripts with shebang lines and mode bits make sense here.
    #[must_use]
    pub const fn is_posix(self) -> bool {
        matches!(self, Self::Posix)
    }
}

/// Select the scripts to install on `platform`.
///
/// Returns the literal `scripts` list on POSIX platforms and an empty list on
/// every other platform. Never fails.
#[must_use]
pub fn select_scripts(platform: Platform, scripts: &[PathBuf]) -> Vec<PathBuf> {
    match platform {
        Platform::Posix => scripts.to_vec(),
        Platform::Windows | Platform::Other => Vec::new(),
    }
}

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Relocate `path` under `new_root`.
///
/// Absolute paths lose their root (and, on Windows, their drive prefix) before
/// being joined onto `new_root`; relative paths are joined as they are. The
/// root is applied exactly once: callers re-root a location when resolving it
/// and never again afterwards.
///
/// # Examples
///
/// ```rust
/// use distkit::utils::platform::change_root;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     change_root(Path::new("/tmp/stage"), Path::new("/usr/local/lib")),
///     PathBuf::from("/tmp/stage/usr/local/lib")
/// );
/// assert_eq!(
///     change_root(Path::new("/tmp/stage"), Path::new("lib")),
///     PathBuf::from("/tmp/stage/lib")
/// );
/// ```
#[must_use]
pub fn change_root(new_root: &Path, path: &Path) -> PathBuf {
    let relative: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    new_root.join(relative)
}

/// Resolves a path given on the command line.
///
/// Expands a leading `~` to the user's home directory and `$VAR` / `${VAR}`
/// references to environment values.
///
/// # Errors
///
/// Returns an error when a referenced environment variable is not set.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("Failed to expand path: {path}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
