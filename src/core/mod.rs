//! Core types for distkit
//!
//! This module holds the error types shared by the descriptor loader, the
//! install pipeline and the CLI.
//!
//! # Error Management
//!
//! - **Strongly-typed errors** ([`DistError`]) for precise error handling in code
//! - **User-friendly contexts** ([`ErrorContext`]) with actionable suggestions for CLI users
//! - **I/O mapping** ([`DistError::from_io`]) from an [`std::io::Error`] kind to a path-carrying variant
//!
//! Library functions return [`anyhow::Result`] and attach the failing path with
//! `.with_context(..)`; the CLI turns the final error into an [`ErrorContext`]
//! with [`user_friendly_error`].

pub mod error;

pub use error::{DistError, ErrorContext, user_friendly_error};
