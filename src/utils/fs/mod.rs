//! File system utilities for the install pipeline
//!
//! Every write the installer performs goes through this module so that the
//! force-overwrite and dry-run settings are honored in one place.
//!
//! # Key Features
//!
//! - **Update semantics**: without `force`, a destination at least as new as
//!   its source is left alone
//! - **Time preservation**: copies carry the source modification time, so a
//!   second non-forced install finds everything up to date
//! - **Dry run**: directory creation and copies are logged but not performed
//! - **Atomic writes**: generated files (metadata record, install record) are
//!   written through a temp file and renamed into place
//!
//! # Examples
//!
//! ```rust,no_run
//! use distkit::utils::fs::{CopyOptions, copy_file, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let opts = CopyOptions { force: true, dry_run: false };
//! ensure_dir(Path::new("stage/assets"), &opts)?;
//! copy_file(Path::new("assets/a.glade"), Path::new("stage/assets/a.glade"), &opts)?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod copy;
pub mod dirs;

pub use atomic::atomic_write;
pub use copy::{CopyOptions, CopyOutcome, copy_file, copy_tree};
pub use dirs::ensure_dir;
