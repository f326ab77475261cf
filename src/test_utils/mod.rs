//! Test utilities for distkit
//!
//! Helpers shared by unit tests and the integration suite: one-time logging
//! setup and [`TestProject`], a throwaway project directory with a
//! descriptor and source files.
//!
//! # Example
//!
//! ```rust,no_run
//! use distkit::test_utils::TestProject;
//!
//! let project = TestProject::sample().unwrap();
//! assert!(project.path().join("dist.toml").is_file());
//! ```

pub mod project;

pub use project::{SAMPLE_DESCRIPTOR, TestProject};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. An explicit `level` wins over
/// `RUST_LOG`; with neither, tests run silently.
///
/// ```bash
/// RUST_LOG=distkit=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}
