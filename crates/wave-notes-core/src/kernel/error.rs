//! # Wave Notes Errors
//!
//! Defines the crate-wide [`Error`] type.
//!
//! Subsystem errors (such as [`ConfigError`]) fold into it via `#[from]`.
//! I/O failures should go through [`Error::io`], which turns
//! `PermissionDenied` into [`Error::Permission`] and keeps the path and
//! operation for the message.
use std::io::ErrorKind;
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::storage::error::ConfigError;

/// Exit status for permission failures (`EX_NOPERM`)
pub const EXIT_PERMISSION: u8 = 77;
/// Exit status for a missing external utility (`EX_UNAVAILABLE`)
pub const EXIT_DEPENDENCY_MISSING: u8 = 69;
/// Exit status for a malformed configuration file (`EX_CONFIG`)
pub const EXIT_CONFIG: u8 = 78;
/// Exit status for everything else
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, ThisError)]
pub enum Error {
    /// A target could not be created, written or removed.
    #[error("Permission denied during '{operation}' on '{}': {source}", path.display())]
    Permission {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// A required utility is not on `PATH`.
    #[error("Required dependency '{name}' was not found on PATH; install it (e.g. `brew install {name}`) and re-run")]
    DependencyMissing { name: String },

    /// The configuration file exists but could not be interpreted.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not determine the home directory; set HOME and re-run")]
    HomeDirUnavailable,

    /// Any other I/O failure.
    #[error("I/O error during '{operation}' on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// A file the tool wants to write exists but belongs to the user.
    #[error("Refusing to overwrite '{}': it was not created by wave-notes-setup", path.display())]
    Conflict { path: PathBuf },

    #[error("Failed to serialize install manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// Error reported by a terminal integration hook.
    #[error("Terminal hook '{hook}' failed: {message}")]
    Hook { hook: String, message: String },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    /// Wrap an I/O error with the operation and path it happened on.
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let operation = operation.into();
        let path = path.into();
        match source.kind() {
            ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => {
                Error::Permission { path, operation, source }
            }
            _ => Error::Io { path, operation, source },
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Permission { .. } => EXIT_PERMISSION,
            Error::DependencyMissing { .. } => EXIT_DEPENDENCY_MISSING,
            Error::Config(_) => EXIT_CONFIG,
            _ => EXIT_FAILURE,
        }
    }

    pub fn is_permission(&self) -> bool {
        matches!(self, Error::Permission { .. })
    }
}
