//! Install command option resolution.
//!
//! [`InstallCommand`] collects the user's install options (command line first,
//! then the descriptor's `[install]` table) and [`InstallCommand::finalize`]
//! turns them into concrete [`InstallLocations`]. The root prefix is applied
//! here, once; every later step works with already-rooted directories.

use crate::constants::{DEFAULT_PREFIX, LIB_SUBDIR, SCRIPTS_SUBDIR, SHARED_DATA_SUBDIR};
use crate::descriptor::InstallSettings;
use crate::utils::platform::change_root;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The three values every data step needs from the install command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedInstallPaths {
    /// Library install directory, with the root prefix already applied
    pub install_lib: PathBuf,
    /// Root prefix for staged installs
    pub root: Option<PathBuf>,
    /// Overwrite files that are already up to date
    pub force: bool,
}

/// Everything the finalized install command decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallLocations {
    /// Library directory, root prefix and force flag
    pub paths: ResolvedInstallPaths,
    /// Script directory (rooted)
    pub scripts_dir: PathBuf,
    /// Generic shared-data directory (rooted)
    pub data_dir: PathBuf,
}

/// User-facing install options before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallCommand {
    pub prefix: Option<PathBuf>,
    pub install_lib: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub force: bool,
    /// File to write the list of installed paths to
    pub record: Option<PathBuf>,
}

impl InstallCommand {
    /// An install command with every option unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn with_install_lib(mut self, install_lib: impl Into<PathBuf>) -> Self {
        self.install_lib = Some(install_lib.into());
        self
    }

    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    #[must_use]
    pub fn with_record(mut self, record: impl Into<PathBuf>) -> Self {
        self.record = Some(record.into());
        self
    }

    /// Fill options left unset on the command line from descriptor settings.
    ///
    /// Relative paths from the descriptor resolve against `base_dir`.
    #[must_use]
    pub fn merged_with(mut self, settings: &InstallSettings, base_dir: &Path) -> Self {
        if self.prefix.is_none() {
            self.prefix = settings.prefix.as_ref().map(|p| base_dir.join(p));
        }
        if self.install_lib.is_none() {
            self.install_lib = settings.install_lib.as_ref().map(|p| base_dir.join(p));
        }
        if self.root.is_none() {
            self.root = settings.root.as_ref().map(|p| base_dir.join(p));
        }
        self.force = self.force || settings.force.unwrap_or(false);
        self
    }

    /// Resolve the install locations.
    ///
    /// `install_lib` defaults to `<prefix>/lib`, scripts go to `<prefix>/bin`
    /// and generic data to `<prefix>/share`. When a non-empty root is set each
    /// location is re-rooted exactly once.
    #[must_use]
    pub fn finalize(&self) -> InstallLocations {
        let prefix = self.prefix.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_PREFIX));
        let root = self.root.clone().filter(|r| !r.as_os_str().is_empty());

        let install_lib = self.install_lib.clone().unwrap_or_else(|| prefix.join(LIB_SUBDIR));
        let scripts_dir = prefix.join(SCRIPTS_SUBDIR);
        let data_dir = prefix.join(SHARED_DATA_SUBDIR);

        let rooted = |path: PathBuf| match &root {
            Some(root) => change_root(root, &path),
            None => path,
        };

        let locations = InstallLocations {
            paths: ResolvedInstallPaths {
                install_lib: rooted(install_lib),
                root: root.clone(),
                force: self.force,
            },
            scripts_dir: rooted(scripts_dir),
            data_dir: rooted(data_dir),
        };
        tracing::debug!(
            "install locations: lib={} scripts={} data={} root={:?} force={}",
            locations.paths.install_lib.display(),
            locations.scripts_dir.display(),
            locations.data_dir.display(),
            locations.paths.root,
            locations.paths.force
        );
        locations
    }
}
