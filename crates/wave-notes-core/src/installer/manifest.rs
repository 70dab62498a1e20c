use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;
use semver::Version;
use serde::{Deserialize, Serialize};

use crate::kernel::constants::APP_VERSION;
use crate::kernel::error::{Error, Result};
use crate::storage::paths::ResolvedPaths;
use crate::utils::fs::write_atomic;

/// Record of what an install created, stored at
/// `~/.wave-notes/manifest.json`.
///
/// It lives outside `NOTES_DIR` and `BIN_DIR` so uninstall can find the
/// locations it names even after the configuration file is gone.
/// Carries no timestamps: installing twice yields the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallManifest {
    pub version: String,
    pub notes_dir: PathBuf,
    pub bin_dir: PathBuf,
    /// The notes directory did not exist before the first install
    #[serde(default)]
    pub created_notes_dir: bool,
    /// The bin directory did not exist before the first install
    #[serde(default)]
    pub created_bin_dir: bool,
    /// Helper file names placed in `bin_dir`
    #[serde(default)]
    pub files: Vec<String>,
    /// Terminal hook that was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
}

impl InstallManifest {
    pub fn new(paths: &ResolvedPaths) -> Self {
        Self {
            version: APP_VERSION.to_string(),
            notes_dir: paths.notes_dir.clone(),
            bin_dir: paths.bin_dir.clone(),
            created_notes_dir: false,
            created_bin_dir: false,
            files: Vec::new(),
            hook: None,
        }
    }

    /// Read a manifest. A missing file is `None`; so is an unparsable one,
    /// after a warning, so that uninstall can still proceed.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io(e, "read_manifest", path)),
        };
        match serde_json::from_str(&data) {
            Ok(manifest) => Ok(Some(manifest)),
            Err(e) => {
                warn!("Ignoring unreadable install manifest {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    /// Write atomically. Returns `false` if the file already matched.
    pub fn save(&self, path: &Path) -> Result<bool> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        write_atomic(path, json.as_bytes(), None)
    }

    /// Locations this manifest was written for.
    pub fn installed_paths(&self, state_dir: &Path) -> ResolvedPaths {
        ResolvedPaths {
            notes_dir: self.notes_dir.clone(),
            bin_dir: self.bin_dir.clone(),
            state_dir: state_dir.to_path_buf(),
        }
    }

    /// Version that wrote the manifest, `None` if it is not semver.
    pub fn installed_version(&self) -> Option<Version> {
        Version::parse(&self.version).ok()
    }

    /// Keep ownership of directories that an earlier install created.
    ///
    /// Only applies when the earlier manifest describes the same locations.
    pub fn merge_previous(&mut self, previous: &InstallManifest) {
        if previous.notes_dir == self.notes_dir {
            self.created_notes_dir |= previous.created_notes_dir;
        }
        if previous.bin_dir == self.bin_dir {
            self.created_bin_dir |= previous.created_bin_dir;
        }
    }
}
