mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use log::info;
use wave_notes_core::kernel::constants::UNINSTALL_NAME;
use wave_notes_core::{version_string, InstallState, Installer, Result, UninstallOptions, UninstallReport};

use crate::cli::CommonArgs;

/// Remove the Wave notes setup. Notes are kept unless --purge is given.
#[derive(Parser, Debug)]
#[command(name = "wave-notes-uninstall", disable_version_flag = true)]
struct UninstallArgs {
    /// Print version and exit
    #[arg(short = 'V', long)]
    version: bool,

    /// Also delete the notes directory and every note in it
    #[arg(long)]
    purge: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let args = UninstallArgs::parse();

    if args.version {
        println!("{}", version_string(UNINSTALL_NAME));
        return ExitCode::SUCCESS;
    }

    logging::init(args.common.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => cli::report_error(&e),
    }
}

fn run(args: &UninstallArgs) -> Result<()> {
    let installer = Installer::from_environment(args.common.config.as_deref())?;
    let options = UninstallOptions { purge: args.purge };
    info!("Current state: {}", installer.state());

    if args.common.mode().is_dry_run() {
        cli::print_plan(&installer.plan_uninstall(options)?);
        return Ok(());
    }

    let report = installer.uninstall(options)?;
    info!("State after uninstall: {}", installer.state());
    print_report(&report);
    Ok(())
}

fn print_report(report: &UninstallReport) {
    if report.state_before == InstallState::Uninstalled && report.removed.is_empty() {
        println!("Nothing to uninstall; wave notes setup is not installed.");
    } else {
        println!("Wave notes setup removed.");
    }
    for path in &report.removed {
        println!("  removed: {}", path.display());
    }
    for path in &report.kept {
        println!("  kept:    {}", path.display());
    }
}
