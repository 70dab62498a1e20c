
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::{tempdir, TempDir};

use crate::environment::DependencyCheck;
use crate::installer::{Installer, TerminalHook};
use crate::kernel::error::{Error, Result};
use crate::storage::config::WaveConfig;
use crate::storage::paths::ResolvedPaths;

/// A fake home directory plus a PATH directory holding a stub `jq`.
pub(super) struct Sandbox {
    pub home: TempDir,
    pub tools: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        let sandbox = Self::without_jq();
        write_executable(&sandbox.tools.path().join("jq"));
        sandbox
    }

    pub fn without_jq() -> Self {
        Self { home: tempdir().unwrap(), tools: tempdir().unwrap() }
    }

    pub fn paths(&self) -> ResolvedPaths {
        ResolvedPaths::resolve(&WaveConfig::default(), self.home.path())
    }

    pub fn paths_with(&self, config: &WaveConfig) -> ResolvedPaths {
        ResolvedPaths::resolve(config, self.home.path())
    }

    pub fn installer(&self) -> Installer {
        self.installer_for(self.paths())
    }

    pub fn installer_for(&self, paths: ResolvedPaths) -> Installer {
        Installer::new(paths, DependencyCheck::with_path(self.tools.path().as_os_str()))
    }
}

#[cfg(unix)]
fn write_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::write(path, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn write_executable(path: &Path) {
    fs::write(path, "").unwrap();
}

/// Make `dir` read-only. Returns `false`, leaving the mode alone, when the
/// current user can write there anyway (as root can).
#[cfg(unix)]
pub(super) fn lock_dir(dir: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o555)).unwrap();
    let scratch = dir.join(".write-check");
    if fs::write(&scratch, "x").is_ok() {
        fs::remove_file(&scratch).unwrap();
        unlock_dir(dir);
        return false;
    }
    true
}

#[cfg(unix)]
pub(super) fn unlock_dir(dir: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Every path under `root` with file contents, for before/after comparisons.
pub(super) fn snapshot(root: &Path) -> Vec<(PathBuf, Option<Vec<u8>>)> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let Ok(entries) = fs::read_dir(&dir) else { continue };
        for entry in entries {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path.clone());
                out.push((path, None));
            } else {
                let data = fs::read(&path).unwrap();
                out.push((path, Some(data)));
            }
        }
    }
    out.sort();
    out
}

/// Hook that records calls instead of touching a terminal.
#[derive(Clone, Default)]
pub(super) struct RecordingHook {
    pub calls: Rc<RefCell<Vec<String>>>,
}

impl TerminalHook for RecordingHook {
    fn name(&self) -> &str {
        "recording"
    }

    fn apply(&self, paths: &ResolvedPaths) -> Result<()> {
        self.calls.borrow_mut().push(format!("apply {}", paths.notes_dir.display()));
        Ok(())
    }

    fn revert(&self, paths: &ResolvedPaths) -> Result<()> {
        self.calls.borrow_mut().push(format!("revert {}", paths.notes_dir.display()));
        Ok(())
    }
}

/// Hook whose `apply` or `revert` fails, as a terminal with a locked
/// configuration would.
#[derive(Clone, Copy, Default)]
pub(super) struct FailingHook {
    pub fail_apply: bool,
    pub fail_revert: bool,
}

impl TerminalHook for FailingHook {
    fn name(&self) -> &str {
        "failing"
    }

    fn apply(&self, _paths: &ResolvedPaths) -> Result<()> {
        if self.fail_apply {
            return Err(Error::Other("terminal configuration is locked".to_string()));
        }
        Ok(())
    }

    fn revert(&self, _paths: &ResolvedPaths) -> Result<()> {
        if self.fail_revert {
            return Err(Error::Other("terminal configuration is locked".to_string()));
        }
        Ok(())
    }
}
