//! File copying with force/update semantics.

use super::dirs::ensure_dir;
use crate::core::DistError;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Settings that govern every write of an install run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Overwrite destinations even when they are up to date.
    pub force: bool,
    /// Log what would be written without touching the filesystem.
    pub dry_run: bool,
}

/// What [`copy_file`] did with a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The destination was written (or would have been, under dry run).
    Copied,
    /// The destination was already up to date and `force` was off.
    Skipped,
}

/// Copy `src` to the file path `dst`.
///
/// Without `force`, a destination whose modification time is not older than
/// the source's is skipped. An existing destination is unlinked before the
/// write, so read-only files and symlinks are replaced rather than written
/// through. The copy keeps the source's permission bits and modification time.
///
/// # Errors
///
/// - [`DistError::SourceFileNotFound`] if `src` does not exist
/// - [`DistError::FileSystemError`] if `src` is not a regular file or the copy fails
/// - [`DistError::PermissionDenied`] if the destination is not writable
pub fn copy_file(src: &Path, dst: &Path, opts: &CopyOptions) -> Result<CopyOutcome> {
    let src_meta = fs::metadata(src).map_err(|e| DistError::from_io(&e, "read source", src))?;
    if !src_meta.is_file() {
        return Err(DistError::FileSystemError {
            operation: "copy (source is not a regular file)".to_string(),
            path: src.display().to_string(),
        }
        .into());
    }

    if !opts.force && dst.exists() && !is_newer(&src_meta, dst) {
        tracing::debug!("not copying {} (output up-to-date)", src.display());
        return Ok(CopyOutcome::Skipped);
    }

    tracing::info!("copying {} -> {}", src.display(), dst.display());
    if opts.dry_run {
        return Ok(CopyOutcome::Copied);
    }

    if fs::symlink_metadata(dst).is_ok() {
        fs::remove_file(dst)
            .map_err(|e| copy_failure(&e, dst))
            .with_context(|| format!("Failed to replace {}", dst.display()))?;
    }
    write_copy(src, dst, &src_meta)
        .map_err(|e| copy_failure(&e, dst))
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;

    Ok(CopyOutcome::Copied)
}

/// Recursively copy the regular files under `src_dir` into `dst_dir`.
///
/// Returns each destination file with what happened to it, in walk order.
///
/// # Errors
///
/// Fails on the first directory that cannot be read or created and on the
/// first file that cannot be copied.
pub fn copy_tree(
    src_dir: &Path,
    dst_dir: &Path,
    opts: &CopyOptions,
) -> Result<Vec<(PathBuf, CopyOutcome)>> {
    if !src_dir.is_dir() {
        return Err(DistError::SourceFileNotFound {
            path: src_dir.display().to_string(),
        })
        .with_context(|| format!("Cannot copy {}: not a directory", src_dir.display()));
    }

    let mut outputs = Vec::new();
    for entry in WalkDir::new(src_dir).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", src_dir.display()))?;
        let relative = entry.path().strip_prefix(src_dir).with_context(|| {
            format!("{} escaped {}", entry.path().display(), src_dir.display())
        })?;
        let target = dst_dir.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target, opts)?;
        } else if entry.file_type().is_file() {
            let outcome = copy_file(entry.path(), &target, opts)?;
            outputs.push((target, outcome));
        }
        // Symlinks and special files are not installed
    }

    Ok(outputs)
}

/// Copy contents into a freshly created `dst`, stamp the source mtime while
/// the handle is still writable, then apply the source permissions.
fn write_copy(src: &Path, dst: &Path, src_meta: &fs::Metadata) -> std::io::Result<()> {
    let mut reader = fs::File::open(src)?;
    let mut writer = fs::File::options().write(true).create_new(true).open(dst)?;
    std::io::copy(&mut reader, &mut writer)?;
    if let Ok(mtime) = src_meta.modified() {
        writer.set_modified(mtime)?;
    }
    drop(writer);
    fs::set_permissions(dst, src_meta.permissions())
}

fn is_newer(src_meta: &fs::Metadata, dst: &Path) -> bool {
    match (src_meta.modified(), fs::metadata(dst).and_then(|m| m.modified())) {
        (Ok(src_time), Ok(dst_time)) => src_time > dst_time,
        _ => true,
    }
}

fn copy_failure(err: &std::io::Error, dst: &Path) -> DistError {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied => DistError::PermissionDenied {
            operation: "write file".to_string(),
            path: dst.display().to_string(),
        },
        _ => DistError::FileSystemError {
            operation: "write file".to_string(),
            path: dst.display().to_string(),
        },
    }
}
