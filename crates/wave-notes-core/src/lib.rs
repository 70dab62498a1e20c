//! Core of the Wave Terminal notes setup: configuration, path resolution,
//! dependency checks and the install/uninstall engine shared by the
//! `wave-notes-setup` and `wave-notes-uninstall` binaries.
pub mod environment;
pub mod installer;
pub mod kernel;
pub mod storage;
pub mod utils;

// Re-export key public types for easier use by the binaries
pub use environment::DependencyCheck;
pub use installer::{
    ExecutionMode, InstallReport, InstallState, Installer, TerminalHook, UninstallOptions, UninstallReport,
};
pub use kernel::error::{Error, Result};
pub use kernel::version_string;
pub use storage::{ResolvedPaths, WaveConfig};
