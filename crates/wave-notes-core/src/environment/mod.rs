//! # Host Environment Checks
//!
//! Verifies that the external utilities the helper scripts call are
//! available before anything is written to disk.
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::kernel::error::{Error, Result};

/// Snapshot of the host `PATH` used for dependency lookups.
#[derive(Debug, Clone)]
pub struct DependencyCheck {
    path_var: OsString,
}

impl DependencyCheck {
    /// Check against the `PATH` of the current process.
    pub fn from_env() -> Self {
        Self::with_path(env::var_os("PATH").unwrap_or_default())
    }

    /// Check against an explicit `PATH` value.
    pub fn with_path(path_var: impl Into<OsString>) -> Self {
        Self { path_var: path_var.into() }
    }

    /// Fail with [`Error::DependencyMissing`] unless `name` is on `PATH`.
    pub fn require(&self, name: &str) -> Result<PathBuf> {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        match which::which_in(name, Some(&self.path_var), cwd) {
            Ok(found) => {
                debug!("Found dependency '{}' at {}", name, found.display());
                Ok(found)
            }
            Err(e) => {
                debug!("Lookup of '{}' failed: {}", name, e);
                Err(Error::DependencyMissing { name: name.to_string() })
            }
        }
    }

    /// Whether `dir` is one of the `PATH` entries.
    pub fn path_contains(&self, dir: &Path) -> bool {
        env::split_paths(&self.path_var).any(|entry| entry == dir)
    }

    /// Require every name in `names`, stopping at the first missing one.
    pub fn require_all(&self, names: &[&str]) -> Result<()> {
        for name in names {
            self.require(name)?;
        }
        info!("All required dependencies present: {}", names.join(", "));
        Ok(())
    }
}

#[cfg(test)]
mod tests;
