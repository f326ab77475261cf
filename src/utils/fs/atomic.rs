//! Atomic file write operations using temp-and-rename strategy.
//!
//! Used for the files the installer generates itself (metadata record,
//! install record) so an interrupted run never leaves a truncated file behind.

use super::copy::CopyOptions;
use super::dirs::ensure_dir;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write `content` to `path` atomically, creating parent directories.
///
/// Generated files are always rewritten; `force` does not apply to them.
/// Under `dry_run` the write is only logged.
///
/// # Errors
///
/// Fails when the parent directory cannot be created or the temp file cannot
/// be written, synced, or renamed into place.
pub fn atomic_write(path: &Path, content: &[u8], opts: &CopyOptions) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent, opts)?;
    }

    tracing::info!("writing {}", path.display());
    if opts.dry_run {
        return Ok(());
    }

    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path)
            .map_err(|e| crate::core::DistError::from_io(&e, "create temp file", &temp_path))
            .with_context(|| {
                let platform_help = if crate::utils::platform::is_windows() {
                    "On Windows: Check file permissions, path length, and that directory exists"
                } else {
                    "Check file permissions and that directory exists"
                };

                format!("Failed to create temp file: {}\n\n{}", temp_path.display(), platform_help)
            })?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}
