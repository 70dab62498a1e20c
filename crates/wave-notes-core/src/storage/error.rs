//! # Configuration Errors
//!
//! Defines [`ConfigError`], raised when `~/.wave-notes.conf` (or the file
//! named with `--config`) exists but a recognized key cannot be read.
//! Unknown keys and lines without `=` never produce an error.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}:{line}: unterminated quote in value of {key}", path.display())]
    UnterminatedQuote { path: PathBuf, line: usize, key: String },

    #[error("{}:{line}: {key} references unsupported variable '${var}' (only $HOME is expanded)", path.display())]
    UnsupportedVariable { path: PathBuf, line: usize, key: String, var: String },

    #[error("{}:{line}: {key} is empty", path.display())]
    EmptyValue { path: PathBuf, line: usize, key: String },

    #[error("{}:{line}: {key} must be an absolute path, got '{value}'", path.display())]
    NotAbsolute { path: PathBuf, line: usize, key: String, value: String },

    #[error("{}: file is not valid UTF-8", path.display())]
    InvalidEncoding { path: PathBuf },

    #[error("configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("could not read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Path of the offending configuration file.
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::UnterminatedQuote { path, .. }
            | ConfigError::UnsupportedVariable { path, .. }
            | ConfigError::EmptyValue { path, .. }
            | ConfigError::NotAbsolute { path, .. }
            | ConfigError::InvalidEncoding { path }
            | ConfigError::FileNotFound { path }
            | ConfigError::Unreadable { path, .. } => path,
        }
    }
}
