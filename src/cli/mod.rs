//! Command-line interface for distkit.
//!
//! Each verb lives in its own module with its own clap argument struct and an
//! `execute_with_descriptor_path` entry point. Global flags are parsed here
//! and turned into a [`CliConfig`] before any verb runs.
//!
//! # Available Commands
//!
//! - `build` - Stage the distribution's packages into the build directory
//! - `install` - Build, then install libraries, scripts, data files and the
//!   metadata record
//! - `show` - Print the distribution metadata as the pipeline sees it
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//! - `--descriptor` - Path to `dist.toml` instead of searching upward
//! - `--dry-run` - Log every write without performing it
//!
//! # Example
//!
//! ```bash
//! # Stage a tree under /tmp/stage for packaging
//! distkit install --prefix /opt/pkg --root /tmp/stage --record files.txt
//!
//! # See what would be written
//! distkit --dry-run install --prefix ~/.local
//! ```

mod build;
pub mod common;
mod install;
mod show;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration for CLI execution.
///
/// Holds the resolved global flags so tests and programmatic callers can
/// drive a verb without going through argument parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Default log filter; `RUST_LOG` takes precedence when set.
    pub log_level: Option<String>,

    /// Log writes instead of performing them.
    pub dry_run: bool,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber.
    ///
    /// Logs go to stderr so that `show` output on stdout stays clean. Calling
    /// this more than once is harmless; only the first subscriber is kept.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("error"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// Top-level command-line interface.
#[derive(Parser)]
#[command(
    name = "distkit",
    about = "Build and install a distribution described by dist.toml",
    version,
    author,
    long_about = "distkit stages packages, scripts and data files described by a dist.toml \
                  descriptor and installs them under a prefix, optionally re-rooted for packaging."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (equivalent to `RUST_LOG=debug`).
    ///
    /// Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the descriptor file (dist.toml).
    ///
    /// By default distkit searches the current directory and its parents.
    #[arg(long, global = true, value_name = "PATH")]
    descriptor: Option<PathBuf>,

    /// Log every copy and directory creation without performing it.
    #[arg(short = 'n', long, global = true)]
    dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Stage packages into the build directory.
    ///
    /// See [`build::BuildCommand`] for options.
    Build(build::BuildCommand),

    /// Build and install the distribution.
    ///
    /// See [`install::InstallCommand`] for options.
    Install(install::InstallCommand),

    /// Print the distribution metadata.
    ///
    /// See [`show::ShowCommand`] for options.
    Show(show::ShowCommand),
}

impl Cli {
    /// Execute the parsed command line.
    ///
    /// # Errors
    ///
    /// Returns the failing verb's error for display by `main`.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Translate global flags into a [`CliConfig`].
    ///
    /// `--verbose` maps to `debug`, `--quiet` to `error` and the default to
    /// `info`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            dry_run: self.dry_run,
        }
    }

    /// Execute with an injected configuration.
    ///
    /// # Errors
    ///
    /// Returns the failing verb's error for display by `main`.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        match self.command {
            Commands::Build(cmd) => cmd.execute_with_descriptor_path(self.descriptor, &config),
            Commands::Install(cmd) => cmd.execute_with_descriptor_path(self.descriptor, &config),
            Commands::Show(cmd) => cmd.execute_with_descriptor_path(self.descriptor, &config),
        }
    }
}
