//! distkit CLI entry point
//!
//! Parses the command line, runs the selected verb and turns any failure into
//! a colored diagnostic with exit status 1.

use anyhow::Result;
use clap::Parser;
use distkit::cli;
use distkit::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
