//! Common helpers for distkit integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub use distkit::test_utils::{SAMPLE_DESCRIPTOR, TestProject};

/// A `distkit` command running inside `project` with logging pinned down.
pub fn distkit(project: &TestProject) -> Command {
    let mut cmd = Command::cargo_bin("distkit").unwrap();
    cmd.current_dir(project.path()).env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

/// Read a text file, panicking with its path on failure.
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}
