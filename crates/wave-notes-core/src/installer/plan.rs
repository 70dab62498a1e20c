use std::fmt;
use std::path::PathBuf;

/// Whether the installer touches the filesystem or only reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Actually execute operations
    #[default]
    Live,
    /// Describe operations without executing them
    DryRun,
}

impl ExecutionMode {
    pub fn is_dry_run(&self) -> bool {
        matches!(self, ExecutionMode::DryRun)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOperationType {
    CreateDir,
    WriteFile,
    DeleteFile,
    DeleteDir,
    /// Leave a path in place, with the reason in `detail`
    Keep,
    ApplyHook,
    RevertHook,
}

/// One step of an install or uninstall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOperation {
    pub operation_type: FileOperationType,
    pub target: PathBuf,
    pub detail: Option<String>,
}

impl FileOperation {
    pub fn new(operation_type: FileOperationType, target: impl Into<PathBuf>) -> Self {
        Self { operation_type, target: target.into(), detail: None }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Human readable "Would ..." line for dry runs
    pub fn dry_run_description(&self) -> String {
        let target = self.target.display();
        let base = match self.operation_type {
            FileOperationType::CreateDir => format!("Would create directory {}", target),
            FileOperationType::WriteFile => format!("Would write {}", target),
            FileOperationType::DeleteFile => format!("Would delete {}", target),
            FileOperationType::DeleteDir => format!("Would delete directory {}", target),
            FileOperationType::Keep => format!("Would keep {}", target),
            FileOperationType::ApplyHook => format!("Would apply terminal integration for {}", target),
            FileOperationType::RevertHook => format!("Would revert terminal integration for {}", target),
        };
        match &self.detail {
            Some(detail) => format!("{} ({})", base, detail),
            None => base,
        }
    }
}

impl fmt::Display for FileOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dry_run_description())
    }
}
