//! Error handling for distkit
//!
//! This module provides the error types and user-friendly error reporting for
//! the installer. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`DistError`] - Enumerated failure cases of the descriptor loader and the
//!   install pipeline
//! - [`ErrorContext`] - Wrapper that adds details and suggestions for display
//!
//! # Error Categories
//!
//! - **Pipeline wiring**: [`DistError::ConfigurationOrdering`]
//! - **Descriptor**: [`DistError::DescriptorNotFound`], [`DistError::DescriptorParseError`]
//! - **File system**: [`DistError::SourceFileNotFound`], [`DistError::FileSystemError`],
//!   [`DistError::PermissionDenied`], [`DistError::PackageNotFound`]
//!
//! Metadata content is never validated, so there is no validation error kind.
//!
//! # Examples
//!
//! ```rust,no_run
//! use distkit::core::{DistError, user_friendly_error};
//!
//! let error = anyhow::Error::from(DistError::DescriptorNotFound);
//! let context = user_friendly_error(error);
//! context.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for distkit operations
///
/// Each variant represents one failure mode of the installer and carries the
/// path or operation needed to produce a useful diagnostic.
#[derive(Error, Debug)]
pub enum DistError {
    /// Install paths were requested before the install command finalized
    ///
    /// This is a pipeline wiring defect, not a user-input problem. It is
    /// fatal and aborts the run immediately.
    #[error("Install paths requested before the install command finalized its options")]
    ConfigurationOrdering,

    /// Descriptor file (dist.toml) not found
    ///
    /// distkit searches for `dist.toml` starting from the current working
    /// directory and walking up the directory tree.
    #[error("Descriptor file dist.toml not found in current directory or any parent directory")]
    DescriptorNotFound,

    /// Descriptor parsing error
    #[error("Invalid descriptor file syntax in {file}")]
    DescriptorParseError {
        /// Path to the descriptor file that failed to parse
        file: String,
        /// Parser message
        reason: String,
    },

    /// A listed package has no source directory
    #[error("Package '{package}' not found at {path}")]
    PackageNotFound {
        /// Dotted package identifier from the descriptor
        package: String,
        /// Directory that was expected to hold the package
        path: String,
    },

    /// A file listed for installation does not exist
    #[error("Source file not found: {path}")]
    SourceFileNotFound {
        /// The missing source path
        path: String,
    },

    /// File system error
    #[error("File system error: {operation} ({path})")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the file system error occurred
        path: String,
    },

    /// Permission denied
    #[error("Permission denied: {operation} ({path})")]
    PermissionDenied {
        /// The operation that was denied due to insufficient permissions
        operation: String,
        /// Path where permission was denied
        path: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl DistError {
    /// Classify an I/O failure on `path` during `operation`.
    ///
    /// Missing files become [`DistError::SourceFileNotFound`], permission
    /// problems [`DistError::PermissionDenied`], everything else
    /// [`DistError::FileSystemError`].
    pub fn from_io(err: &std::io::Error, operation: &str, path: &std::path::Path) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::SourceFileNotFound {
                path,
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                operation: operation.to_string(),
                path,
            },
            _ => Self::FileSystemError {
                operation: operation.to_string(),
                path,
            },
        }
    }
}

impl Clone for DistError {
    fn clone(&self) -> Self {
        match self {
            Self::ConfigurationOrdering => Self::ConfigurationOrdering,
            Self::DescriptorNotFound => Self::DescriptorNotFound,
            Self::DescriptorParseError {
                file,
                reason,
            } => Self::DescriptorParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::PackageNotFound {
                package,
                path,
            } => Self::PackageNotFound {
                package: package.clone(),
                path: path.clone(),
            },
            Self::SourceFileNotFound {
                path,
            } => Self::SourceFileNotFound {
                path: path.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::PermissionDenied {
                operation,
                path,
            } => Self::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// `ErrorContext` wraps a [`DistError`] and adds optional details and a
/// suggestion for resolution. This is how the CLI presents errors.
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context in yellow (optional)
/// 3. **Suggestion**: Actionable steps in green (optional)
///
/// # Examples
///
/// ```rust,no_run
/// use distkit::core::{DistError, ErrorContext};
///
/// let context = ErrorContext::new(DistError::DescriptorNotFound)
///     .with_suggestion("Create a dist.toml file in your project directory")
///     .with_details("distkit searches current and parent directories for dist.toml");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DistError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DistError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with suggestions
///
/// Recognizes [`DistError`] anywhere in the error chain, then bare
/// [`std::io::Error`]s, and falls back to the error's own message. The full
/// `anyhow` context chain is kept as details so the failing path is always
/// shown.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let chain = format!("{error:#}");

    if let Some(dist_error) = error.chain().find_map(|e| e.downcast_ref::<DistError>()) {
        let ctx = create_error_context(dist_error.clone());
        return if ctx.details.is_none() && chain != dist_error.to_string() {
            ctx.with_details(chain)
        } else {
            ctx
        };
    }

    if let Some(io_error) = error.chain().find_map(|e| e.downcast_ref::<std::io::Error>()) {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(DistError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion(
                    "Use --root to stage into a writable directory, or re-run with elevated permissions",
                )
                .with_details(chain);
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(DistError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(chain);
            }
            _ => {}
        }
    }

    ErrorContext::new(DistError::Other {
        message: chain,
    })
}

fn create_error_context(error: DistError) -> ErrorContext {
    match &error {
        DistError::ConfigurationOrdering => ErrorContext::new(error)
            .with_details("The install-data step ran before the install command resolved its paths")
            .with_suggestion("This is an installer defect; please report it"),
        DistError::DescriptorNotFound => ErrorContext::new(error)
            .with_suggestion("Create a dist.toml file or pass --descriptor <PATH>"),
        DistError::DescriptorParseError {
            reason,
            ..
        } => ErrorContext::new(error.clone())
            .with_details(reason.clone())
            .with_suggestion("Check the TOML syntax of the descriptor file"),
        DistError::PackageNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the package list and the [build] package-root setting"),
        DistError::SourceFileNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Source paths are resolved relative to the directory of dist.toml"),
        DistError::PermissionDenied {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Use --root to stage into a writable directory, or re-run with elevated permissions",
        ),
        _ => ErrorContext::new(error),
    }
}
