//! # Installer
//!
//! Creates and removes the notes setup described by [`ResolvedPaths`].
//!
//! Install state lives on disk only: the manifest in the state directory
//! under home and the ownership marker inside each helper file.
//! [`InstallState::detect`] reads both, so no flag needs to survive between
//! invocations. The manifest records where `NOTES_DIR` and `BIN_DIR` were at
//! install time; uninstall follows it rather than the current configuration.
pub mod hook;
pub mod manifest;
pub mod plan;
pub mod shim;

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::environment::DependencyCheck;
use crate::kernel::constants::{OWNERSHIP_MARKER, REQUIRED_DEPENDENCY, SHIM_NAME};
use crate::kernel::app_version;
use crate::kernel::error::{Error, Result};
use crate::storage::config::WaveConfig;
use crate::storage::paths::{home_dir, ResolvedPaths};
use crate::utils::{
    create_dir_all, has_line, remove_dir_all_if_exists, remove_dir_if_empty, remove_file_if_exists, write_atomic,
};

pub use hook::{NoopHook, TerminalHook};
pub use manifest::InstallManifest;
pub use plan::{ExecutionMode, FileOperation, FileOperationType};

/// Mode bits for helper scripts
const SHIM_MODE: u32 = 0o755;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    Uninstalled,
    Installed,
}

impl InstallState {
    /// Installed when the manifest exists or the helper script carries the
    /// ownership marker.
    pub fn detect(paths: &ResolvedPaths) -> Self {
        if paths.manifest_path().is_file() || has_line(&paths.shim_path(), OWNERSHIP_MARKER) {
            InstallState::Installed
        } else {
            InstallState::Uninstalled
        }
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallState::Uninstalled => write!(f, "uninstalled"),
            InstallState::Installed => write!(f, "installed"),
        }
    }
}

/// What a completed install did.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub paths: ResolvedPaths,
    pub state_before: InstallState,
    pub created_notes_dir: bool,
    pub created_bin_dir: bool,
    /// Files whose content changed
    pub written: Vec<PathBuf>,
    /// Whether `bin_dir` appears on the `PATH` the install ran with
    pub bin_dir_on_path: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UninstallOptions {
    /// Also delete the notes directory and everything in it
    pub purge: bool,
}

/// What a completed uninstall did.
#[derive(Debug, Clone)]
pub struct UninstallReport {
    pub paths: ResolvedPaths,
    pub state_before: InstallState,
    pub removed: Vec<PathBuf>,
    /// Paths deliberately left in place
    pub kept: Vec<PathBuf>,
}

/// Steps a single install call has taken, for rollback.
#[derive(Debug, Default)]
struct InstallProgress {
    created_notes_dir: bool,
    created_bin_dir: bool,
    created_state_dir: bool,
    created_shim: bool,
    applied_hook: bool,
}

pub struct Installer {
    paths: ResolvedPaths,
    dependencies: DependencyCheck,
    hook: Box<dyn TerminalHook>,
}

impl Installer {
    pub fn new(paths: ResolvedPaths, dependencies: DependencyCheck) -> Self {
        Self { paths, dependencies, hook: Box::new(NoopHook) }
    }

    /// Resolve paths from the home directory, the configuration file and
    /// the process `PATH`.
    pub fn from_environment(config_path: Option<&Path>) -> Result<Self> {
        let home = home_dir()?;
        let config = WaveConfig::load(&home, config_path)?;
        match config.source() {
            Some(source) => debug!("Configuration read from {}", source.display()),
            None => debug!("No configuration file; using default locations"),
        }
        let paths = ResolvedPaths::resolve(&config, &home);
        debug!("Resolved paths: {:?}", paths);
        Ok(Self::new(paths, DependencyCheck::from_env()))
    }

    pub fn with_hook(mut self, hook: Box<dyn TerminalHook>) -> Self {
        self.hook = hook;
        self
    }

    pub fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }

    pub fn state(&self) -> InstallState {
        InstallState::detect(&self.paths)
    }

    /// Fail unless every external utility the helpers need is on `PATH`.
    pub fn check_dependencies(&self) -> Result<()> {
        self.dependencies.require_all(&[REQUIRED_DEPENDENCY])
    }

    /// Operations [`Installer::install`] would perform right now.
    pub fn plan_install(&self) -> Vec<FileOperation> {
        let paths = &self.paths;
        let mut plan = Vec::new();
        for dir in [&paths.notes_dir, &paths.bin_dir, &paths.state_dir] {
            if !dir.is_dir() {
                plan.push(FileOperation::new(FileOperationType::CreateDir, dir));
            }
        }
        plan.push(FileOperation::new(FileOperationType::WriteFile, paths.shim_path()).with_detail("helper script"));
        plan.push(FileOperation::new(FileOperationType::ApplyHook, &paths.notes_dir).with_detail(self.hook.name()));
        plan.push(FileOperation::new(FileOperationType::WriteFile, paths.manifest_path()).with_detail("install manifest"));
        plan
    }

    /// Create the notes setup. Safe to run repeatedly.
    ///
    /// Dependencies are checked before anything is written. If a later step
    /// fails, the helper script and directories this call created are
    /// removed again.
    pub fn install(&self) -> Result<InstallReport> {
        self.check_dependencies()?;

        let state_before = self.state();
        info!("Installing into {} (state: {})", self.paths.notes_dir.display(), state_before);

        let mut progress = InstallProgress::default();
        match self.install_steps(&mut progress) {
            Ok(written) => Ok(InstallReport {
                paths: self.paths.clone(),
                state_before,
                created_notes_dir: progress.created_notes_dir,
                created_bin_dir: progress.created_bin_dir,
                written,
                bin_dir_on_path: self.dependencies.path_contains(&self.paths.bin_dir),
            }),
            Err(e) => {
                self.rollback(&progress);
                Err(e)
            }
        }
    }

    fn install_steps(&self, progress: &mut InstallProgress) -> Result<Vec<PathBuf>> {
        let paths = &self.paths;
        let previous = InstallManifest::load(&paths.manifest_path())?;
        if let Some(previous) = &previous {
            Self::check_previous_version(previous)?;
        }

        progress.created_notes_dir = create_dir_all(&paths.notes_dir)?;
        progress.created_bin_dir = create_dir_all(&paths.bin_dir)?;
        progress.created_state_dir = create_dir_all(&paths.state_dir)?;

        let mut written = Vec::new();

        let shim_path = paths.shim_path();
        let shim_existed = shim_path.exists();
        if shim_existed && !has_line(&shim_path, OWNERSHIP_MARKER) {
            return Err(Error::Conflict { path: shim_path });
        }
        if write_atomic(&shim_path, shim::render(paths).as_bytes(), Some(SHIM_MODE))? {
            info!("Wrote helper script {}", shim_path.display());
            progress.created_shim = !shim_existed;
            written.push(shim_path);
        } else {
            debug!("Helper script {} already up to date", shim_path.display());
        }

        self.hook.apply(paths).map_err(|e| self.hook_error(e))?;
        progress.applied_hook = previous.as_ref().and_then(|m| m.hook.as_ref()).is_none();

        let mut manifest = InstallManifest::new(paths);
        manifest.created_notes_dir = progress.created_notes_dir;
        manifest.created_bin_dir = progress.created_bin_dir;
        manifest.files = vec![SHIM_NAME.to_string()];
        manifest.hook = Some(self.hook.name().to_string());
        if let Some(previous) = &previous {
            manifest.merge_previous(previous);
        }
        let manifest_path = paths.manifest_path();
        if manifest.save(&manifest_path)? {
            written.push(manifest_path);
        }

        if let Some(previous) = &previous {
            self.retire_previous_helpers(previous);
        }

        Ok(written)
    }

    /// Compare the version that wrote `previous` with this build.
    fn check_previous_version(previous: &InstallManifest) -> Result<()> {
        let current = app_version()?;
        match previous.installed_version() {
            Some(v) if v > current => {
                warn!("Existing install was made by newer version {}; rewriting it as {}", v, current)
            }
            Some(v) if v < current => info!("Upgrading existing install from {} to {}", v, current),
            Some(_) => {}
            None => warn!("Install manifest has an unrecognized version '{}'", previous.version),
        }
        Ok(())
    }

    /// Remove helpers left in a bin directory that the configuration no
    /// longer names. The new manifest has already replaced the old record.
    fn retire_previous_helpers(&self, previous: &InstallManifest) {
        if previous.bin_dir == self.paths.bin_dir {
            return;
        }
        for name in Self::helper_names(Some(previous)) {
            let file = previous.bin_dir.join(&name);
            if !has_line(&file, OWNERSHIP_MARKER) {
                continue;
            }
            match remove_file_if_exists(&file) {
                Ok(_) => info!("Removed helper {} from previous bin directory", file.display()),
                Err(e) => warn!("Could not remove old helper {}: {}", file.display(), e),
            }
        }
        if previous.created_bin_dir {
            if let Err(e) = remove_dir_if_empty(&previous.bin_dir) {
                warn!("Could not remove previous bin directory {}: {}", previous.bin_dir.display(), e);
            }
        }
    }

    fn rollback(&self, progress: &InstallProgress) {
        if progress.applied_hook {
            if let Err(e) = self.hook.revert(&self.paths) {
                warn!("Could not roll back terminal hook '{}': {}", self.hook.name(), e);
            }
        }
        if progress.created_shim {
            let shim_path = self.paths.shim_path();
            if let Err(e) = remove_file_if_exists(&shim_path) {
                warn!("Could not roll back {}: {}", shim_path.display(), e);
            }
        }

        // An empty state directory is never user content
        let mut dirs = vec![self.paths.state_dir.clone()];
        if progress.created_notes_dir {
            dirs.push(self.paths.notes_dir.clone());
        }
        if progress.created_bin_dir {
            dirs.push(self.paths.bin_dir.clone());
        }
        for dir in dirs {
            if let Err(e) = remove_dir_if_empty(&dir) {
                warn!("Could not roll back {}: {}", dir.display(), e);
            }
        }
    }

    /// Tag a hook failure with the hook's name. Permission errors keep
    /// their own kind so the exit status stays meaningful.
    fn hook_error(&self, e: Error) -> Error {
        match e {
            Error::Permission { .. } | Error::Hook { .. } => e,
            other => Error::Hook { hook: self.hook.name().to_string(), message: other.to_string() },
        }
    }

    /// Locations recorded at install time, or the resolved ones without a
    /// manifest.
    fn installed_paths(&self, manifest: Option<&InstallManifest>) -> ResolvedPaths {
        match manifest {
            Some(m) => m.installed_paths(&self.paths.state_dir),
            None => self.paths.clone(),
        }
    }

    /// Bin directories to clean: the one recorded at install time, plus the
    /// resolved one if the configuration has since changed.
    fn bin_dirs(&self, manifest: Option<&InstallManifest>) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(m) = manifest {
            dirs.push(m.bin_dir.clone());
        }
        if !dirs.contains(&self.paths.bin_dir) {
            dirs.push(self.paths.bin_dir.clone());
        }
        dirs
    }

    fn helper_names(manifest: Option<&InstallManifest>) -> BTreeSet<String> {
        let mut names = BTreeSet::from([SHIM_NAME.to_string()]);
        if let Some(m) = manifest {
            names.extend(m.files.iter().cloned());
        }
        names
    }

    /// Operations [`Installer::uninstall`] would perform right now.
    pub fn plan_uninstall(&self, options: UninstallOptions) -> Result<Vec<FileOperation>> {
        let manifest_path = self.paths.manifest_path();
        let manifest = InstallManifest::load(&manifest_path)?;
        let installed = self.installed_paths(manifest.as_ref());
        let mut plan =
            vec![FileOperation::new(FileOperationType::RevertHook, &installed.notes_dir).with_detail(self.hook.name())];

        for bin_dir in self.bin_dirs(manifest.as_ref()) {
            for name in Self::helper_names(manifest.as_ref()) {
                let file = bin_dir.join(&name);
                if has_line(&file, OWNERSHIP_MARKER) {
                    plan.push(FileOperation::new(FileOperationType::DeleteFile, file));
                } else if file.exists() {
                    plan.push(FileOperation::new(FileOperationType::Keep, file).with_detail("not created by wave-notes-setup"));
                }
            }
        }

        let notes_dir = &installed.notes_dir;
        if options.purge && notes_dir.exists() {
            plan.push(FileOperation::new(FileOperationType::DeleteDir, notes_dir).with_detail("--purge, including notes"));
        } else if manifest.as_ref().is_some_and(|m| m.created_notes_dir) {
            plan.push(FileOperation::new(FileOperationType::DeleteDir, notes_dir).with_detail("only if empty"));
        } else if notes_dir.exists() {
            plan.push(FileOperation::new(FileOperationType::Keep, notes_dir).with_detail("user notes"));
        }
        if manifest.as_ref().is_some_and(|m| m.created_bin_dir) {
            plan.push(FileOperation::new(FileOperationType::DeleteDir, &installed.bin_dir).with_detail("only if empty"));
        }

        if manifest_path.exists() {
            plan.push(FileOperation::new(FileOperationType::DeleteFile, &manifest_path).with_detail("install manifest"));
        }
        if self.paths.state_dir.exists() {
            plan.push(FileOperation::new(FileOperationType::DeleteDir, &self.paths.state_dir).with_detail("only if empty"));
        }
        Ok(plan)
    }

    /// Remove everything [`Installer::install`] created, leaving user notes
    /// alone unless `options.purge` is set. Succeeds when nothing is
    /// installed.
    ///
    /// The manifest is removed last, so a run that fails partway can be
    /// retried.
    pub fn uninstall(&self, options: UninstallOptions) -> Result<UninstallReport> {
        let state_before = self.state();
        let manifest_path = self.paths.manifest_path();
        let manifest = InstallManifest::load(&manifest_path)?;
        let installed = self.installed_paths(manifest.as_ref());
        info!("Uninstalling from {} (state: {})", installed.notes_dir.display(), state_before);

        let mut removed = Vec::new();
        let mut kept = Vec::new();

        self.hook.revert(&installed).map_err(|e| self.hook_error(e))?;

        for bin_dir in self.bin_dirs(manifest.as_ref()) {
            for name in Self::helper_names(manifest.as_ref()) {
                let file = bin_dir.join(&name);
                if has_line(&file, OWNERSHIP_MARKER) {
                    if remove_file_if_exists(&file)? {
                        info!("Removed {}", file.display());
                        removed.push(file);
                    }
                } else if file.exists() {
                    warn!("Leaving {}: not created by wave-notes-setup", file.display());
                    kept.push(file);
                }
            }
        }

        let notes_dir = &installed.notes_dir;
        if options.purge {
            if remove_dir_all_if_exists(notes_dir)? {
                info!("Purged notes directory {}", notes_dir.display());
                removed.push(notes_dir.clone());
            }
        } else {
            let created = manifest.as_ref().is_some_and(|m| m.created_notes_dir);
            if created && remove_dir_if_empty(notes_dir)? {
                removed.push(notes_dir.clone());
            } else if notes_dir.exists() {
                kept.push(notes_dir.clone());
            }
        }

        if manifest.as_ref().is_some_and(|m| m.created_bin_dir) && remove_dir_if_empty(&installed.bin_dir)? {
            removed.push(installed.bin_dir.clone());
        }

        if remove_file_if_exists(&manifest_path)? {
            removed.push(manifest_path);
        }
        let state_dir = &self.paths.state_dir;
        if remove_dir_if_empty(state_dir)? {
            removed.push(state_dir.clone());
        } else if state_dir.exists() {
            kept.push(state_dir.clone());
        }

        Ok(UninstallReport { paths: installed, state_before, removed, kept })
    }
}

#[cfg(test)]
mod tests;
