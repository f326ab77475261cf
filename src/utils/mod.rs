//! Cross-platform utilities for the installer
//!
//! - [`fs`] - copying and writing with force/update and dry-run semantics
//! - [`platform`] - OS family detection, script selection, root relocation

pub mod fs;
pub mod platform;

pub use fs::{CopyOptions, CopyOutcome, atomic_write, copy_file, copy_tree, ensure_dir};
pub use platform::{Platform, change_root, is_windows, resolve_path, select_scripts};
