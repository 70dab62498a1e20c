use std::fs;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::kernel::error::{Error, Result};

/// Create `path` and any missing parents.
///
/// Returns `true` when `path` did not exist before the call. An existing
/// non-directory at `path` is an error.
pub fn create_dir_all(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    let existed = path.exists();
    fs::create_dir_all(path).map_err(|e| Error::io(e, "create_dir_all", path))?;
    if !path.is_dir() {
        return Err(Error::io(
            io::Error::new(ErrorKind::AlreadyExists, "path exists and is not a directory"),
            "create_dir_all",
            path,
        ));
    }
    Ok(!existed)
}

/// Write `contents` to `path` through a temporary file in the same
/// directory, then rename it into place.
///
/// Returns `false` without touching the file when it already holds exactly
/// `contents`.
pub fn write_atomic(path: &Path, contents: &[u8], mode: Option<u32>) -> Result<bool> {
    if let Ok(existing) = fs::read(path) {
        if existing == contents && mode_matches(path, mode) {
            return Ok(false);
        }
    }

    let parent = path.parent().ok_or_else(|| {
        Error::io(io::Error::new(ErrorKind::InvalidInput, "path has no parent directory"), "write_atomic", path)
    })?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| Error::io(e, "create_temp_file", parent))?;
    temp.write_all(contents).map_err(|e| Error::io(e, "write_temp_file", temp.path()))?;
    temp.as_file().sync_all().map_err(|e| Error::io(e, "sync_temp_file", temp.path()))?;
    if let Some(mode) = mode {
        set_mode(temp.path(), mode)?;
    }
    // A failed persist drops the temporary file, leaving the target as it was
    temp.persist(path).map_err(|e| Error::io(e.error, "persist", path))?;
    Ok(true)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| Error::io(e, "set_permissions", path))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn mode_matches(path: &Path, mode: Option<u32>) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match (mode, fs::metadata(path)) {
        (None, _) => true,
        (Some(mode), Ok(meta)) => meta.permissions().mode() & 0o7777 == mode,
        (Some(_), Err(_)) => false,
    }
}

#[cfg(not(unix))]
fn mode_matches(_path: &Path, _mode: Option<u32>) -> bool {
    true
}

/// Remove a file. Returns `false` if it was already gone.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(e, "remove_file", path)),
    }
}

/// Remove a directory only when it has no entries left.
pub fn remove_dir_if_empty(path: &Path) -> Result<bool> {
    let mut entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(Error::io(e, "read_dir", path)),
    };
    if entries.next().is_some() {
        return Ok(false);
    }
    match fs::remove_dir(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(e, "remove_dir", path)),
    }
}

/// Remove a directory tree. Returns `false` if it did not exist.
pub fn remove_dir_all_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(e, "remove_dir_all", path)),
    }
}

/// Whether any line of the file equals `line` after trimming.
/// Unreadable or missing files count as not containing it.
pub fn has_line(path: &Path, line: &str) -> bool {
    let Ok(file) = fs::File::open(path) else {
        return false;
    };
    io::BufReader::new(file)
        .lines()
        .map_while(|l| l.ok())
        .any(|l| l.trim() == line)
}
