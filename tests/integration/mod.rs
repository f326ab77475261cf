//! Integration test suite for distkit
//!
//! End-to-end tests that drive the `distkit` binary against temporary
//! projects.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **build**: `build` verb and staging
//! - **errors**: diagnostics and exit codes
//! - **install**: `install` verb, prefixes, roots and records
//! - **show**: `show` verb output

#[path = "../common/mod.rs"]
mod common;

mod build;
mod errors;
mod install;
mod show;
