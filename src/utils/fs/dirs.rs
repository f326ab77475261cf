//! Directory creation for install destinations.

use super::copy::CopyOptions;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// Under `dry_run` the creation is only logged.
///
/// # Errors
///
/// - The path exists but is not a directory
/// - The directory cannot be created (permissions, read-only filesystem)
pub fn ensure_dir(path: &Path, opts: &CopyOptions) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(crate::core::DistError::FileSystemError {
            operation: "create directory (path exists but is not a directory)".to_string(),
            path: path.display().to_string(),
        }
        .into());
    }

    tracing::info!("creating {}", path.display());
    if opts.dry_run {
        return Ok(());
    }

    fs::create_dir_all(path)
        .map_err(|e| crate::core::DistError::from_io(&e, "create directory", path))
        .with_context(|| {
            let platform_help = if crate::utils::platform::is_windows() {
                "On Windows: Check that the path length is < 260 chars or that long path support is enabled"
            } else {
                "Check directory permissions and path validity"
            };

            format!("Failed to create directory: {}\n\n{}", path.display(), platform_help)
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const WRITE: CopyOptions = CopyOptions {
        force: false,
        dry_run: false,
    };

    #[test]
    fn test_ensure_dir() {
        let temp = tempdir().unwrap();
        let test_dir = temp.path().join("a").join("b");

        assert!(!test_dir.exists());
        ensure_dir(&test_dir, &WRITE).unwrap();
        assert!(test_dir.is_dir());

        // Second call is a no-op
        ensure_dir(&test_dir, &WRITE).unwrap();
    }

    #[test]
    fn test_ensure_dir_on_file() {
        let temp = tempdir().unwrap();
        let file_path = temp.path().join("file.txt");
        std::fs::write(&file_path, "content").unwrap();

        assert!(ensure_dir(&file_path, &WRITE).is_err());
    }

    #[test]
    fn test_ensure_dir_dry_run() {
        let temp = tempdir().unwrap();
        let test_dir = temp.path().join("never");

        ensure_dir(
            &test_dir,
            &CopyOptions {
                force: false,
                dry_run: true,
            },
        )
        .unwrap();
        assert!(!test_dir.exists());
    }
}
