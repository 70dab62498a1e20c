//! Effective locations for everything the installer touches.
use std::path::{Path, PathBuf};

use crate::kernel::constants::{
    DEFAULT_BIN_SUBDIR, DEFAULT_NOTES_SUBDIR, MANIFEST_FILE_NAME, SHIM_NAME, STATE_DIR_NAME,
};
use crate::kernel::error::{Error, Result};
use crate::storage::config::WaveConfig;

/// The user's home directory, as reported by the platform.
pub fn home_dir() -> Result<PathBuf> {
    match dirs::home_dir() {
        Some(home) if home.is_absolute() => Ok(home),
        _ => Err(Error::HomeDirUnavailable),
    }
}

/// Notes and bin directories after applying configuration overrides, plus
/// the state directory, which is always under home.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub notes_dir: PathBuf,
    pub bin_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl ResolvedPaths {
    /// Defaults under `home`, overridden by whatever `config` sets.
    pub fn resolve(config: &WaveConfig, home: &Path) -> Self {
        Self {
            notes_dir: config.notes_dir.clone().unwrap_or_else(|| home.join(DEFAULT_NOTES_SUBDIR)),
            bin_dir: config.bin_dir.clone().unwrap_or_else(|| home.join(DEFAULT_BIN_SUBDIR)),
            state_dir: Self::state_dir_for(home),
        }
    }

    /// State directory for `home`. Configuration never moves it.
    pub fn state_dir_for(home: &Path) -> PathBuf {
        home.join(STATE_DIR_NAME)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.state_dir.join(MANIFEST_FILE_NAME)
    }

    /// Full path of a helper file inside the bin directory
    pub fn bin_file(&self, name: &str) -> PathBuf {
        self.bin_dir.join(name)
    }

    pub fn shim_path(&self) -> PathBuf {
        self.bin_file(SHIM_NAME)
    }
}
