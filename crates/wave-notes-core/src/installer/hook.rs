//! Terminal integration seam.
//!
//! Wiring the notes directory into the terminal emulator's own
//! configuration is left to an implementation of [`TerminalHook`]. The
//! installer only decides *when* the hook runs.
use log::info;

use crate::kernel::error::Result;
use crate::storage::paths::ResolvedPaths;

/// A sink the installer notifies once helper files are in place, and again
/// before they are removed.
///
/// Both methods must be idempotent: `apply` may run on an already-configured
/// terminal, `revert` on one that was never configured.
pub trait TerminalHook {
    /// Short name recorded in the install manifest.
    fn name(&self) -> &str;

    /// Point the terminal at the resolved notes setup.
    fn apply(&self, paths: &ResolvedPaths) -> Result<()>;

    /// Undo whatever [`TerminalHook::apply`] did.
    fn revert(&self, paths: &ResolvedPaths) -> Result<()>;
}

/// Hook that leaves the terminal configuration alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl TerminalHook for NoopHook {
    fn name(&self) -> &str {
        "none"
    }

    fn apply(&self, paths: &ResolvedPaths) -> Result<()> {
        info!("No terminal integration configured; notes live in {}", paths.notes_dir.display());
        Ok(())
    }

    fn revert(&self, _paths: &ResolvedPaths) -> Result<()> {
        Ok(())
    }
}
