//! Temporary project fixture.

use crate::constants::DESCRIPTOR_FILE_NAME;
use crate::descriptor::DescriptorFile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Descriptor of the sample project created by [`TestProject::sample`].
pub const SAMPLE_DESCRIPTOR: &str = r#"[metadata]
name = "Twisted"
version = "0.15.5"
description = "Twisted 0.15.5 is a framework to build frameworks"
url = "http://twistedmatrix.com/"
license = "GNU LGPL"
keywords = "internet www tcp framework games"
platforms = "win32 posix"

[metadata.author]
name = "Twisted Matrix Laboratories"
email = "twisted-python@twistedmatrix.com"

[options]
packages = ["twisted", "twisted.im"]
scripts = ["bin/twistd", "bin/im"]

[[data-files]]
target = "twisted/im"
files = ["data/instancemessenger.glade"]

[command-overrides]
install-data = "lib-relative"
"#;

/// A project directory that is removed when dropped.
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    /// An empty project directory.
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new().context("Failed to create temp directory")?,
        })
    }

    /// A two-package project with scripts and a lib-relative data file.
    pub fn sample() -> Result<Self> {
        Self::new()?
            .with_descriptor(SAMPLE_DESCRIPTOR)?
            .with_file("twisted/main.py", "print('twisted')\n")?
            .with_file("twisted/im/chat.py", "print('im')\n")?
            .with_file("data/instancemessenger.glade", "<glade-interface/>\n")?
            .with_file("bin/twistd", "#!/bin/sh\necho twistd\n")?
            .with_file("bin/im", "#!/bin/sh\necho im\n")
    }

    /// Project root.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path of the descriptor file.
    pub fn descriptor_path(&self) -> PathBuf {
        self.path().join(DESCRIPTOR_FILE_NAME)
    }

    /// Write `dist.toml`.
    pub fn with_descriptor(self, content: &str) -> Result<Self> {
        let path = self.descriptor_path();
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(self)
    }

    /// Write a file relative to the project root, creating parent directories.
    pub fn with_file(self, relative: impl AsRef<Path>, content: &str) -> Result<Self> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(self)
    }

    /// Remove a file written earlier.
    pub fn remove_file(&self, relative: impl AsRef<Path>) -> Result<()> {
        let path = self.path().join(relative);
        std::fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))
    }

    /// Parse the project's descriptor.
    pub fn load_descriptor(&self) -> Result<DescriptorFile> {
        DescriptorFile::load(&self.descriptor_path())
    }
}
