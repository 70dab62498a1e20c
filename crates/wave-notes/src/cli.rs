//! Argument types and terminal output shared by `wave-notes-setup` and
//! `wave-notes-uninstall`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use wave_notes_core::installer::FileOperation;
use wave_notes_core::{Error, ExecutionMode};

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Show what would change without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Read configuration from this file instead of ~/.wave-notes.conf
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    pub fn mode(&self) -> ExecutionMode {
        if self.dry_run { ExecutionMode::DryRun } else { ExecutionMode::Live }
    }
}

/// Print an error on stderr and turn it into the process exit status.
pub fn report_error(err: &Error) -> ExitCode {
    eprintln!("error: {}", err);
    ExitCode::from(err.exit_code())
}

pub fn print_plan(plan: &[FileOperation]) {
    println!("Dry run, no changes made:");
    for op in plan {
        println!("  - {}", op);
    }
}
