//! Global constants used throughout the distkit codebase.
//!
//! File names, default directory layouts, and other literal values that more
//! than one module needs. Defining them centrally keeps the install layout
//! discoverable in one place.

/// File name of the distribution descriptor searched for by the CLI.
pub const DESCRIPTOR_FILE_NAME: &str = "dist.toml";

/// Build staging directory, relative to the descriptor's directory.
pub const DEFAULT_BUILD_LIB: &str = "build/lib";

/// Installation prefix used when neither the command line nor the descriptor
/// names one.
#[cfg(windows)]
pub const DEFAULT_PREFIX: &str = "C:\\Program Files";

/// Installation prefix used when neither the command line nor the descriptor
/// names one.
#[cfg(not(windows))]
pub const DEFAULT_PREFIX: &str = "/usr/local";

/// Library subdirectory of the prefix.
pub const LIB_SUBDIR: &str = "lib";

/// Script subdirectory of the prefix.
pub const SCRIPTS_SUBDIR: &str = "bin";

/// Shared data subdirectory of the prefix (the generic install-data target).
pub const SHARED_DATA_SUBDIR: &str = "share";

/// Extension of the metadata record written next to the installed packages.
pub const METADATA_RECORD_EXTENSION: &str = "pkg-info";

/// Pipeline command name whose implementation can be overridden.
pub const INSTALL_DATA_COMMAND: &str = "install-data";

/// Permission bits applied to installed scripts on Unix.
pub const SCRIPT_MODE: u32 = 0o755;
