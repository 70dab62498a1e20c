mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use log::info;
use wave_notes_core::kernel::constants::{APP_NAME, UNINSTALL_NAME};
use wave_notes_core::{version_string, InstallReport, InstallState, Installer, Result};

use crate::cli::CommonArgs;

/// Configure Wave Terminal with a Warp-like notes system
#[derive(Parser, Debug)]
#[command(name = "wave-notes-setup", disable_version_flag = true)]
struct SetupArgs {
    /// Print version and exit
    #[arg(short = 'V', long)]
    version: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let args = SetupArgs::parse();

    if args.version {
        println!("{}", version_string(APP_NAME));
        return ExitCode::SUCCESS;
    }

    logging::init(args.common.verbose);

    match run(&args.common) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => cli::report_error(&e),
    }
}

fn run(common: &CommonArgs) -> Result<()> {
    let installer = Installer::from_environment(common.config.as_deref())?;
    info!("Current state: {}", installer.state());

    if common.mode().is_dry_run() {
        // Surface a missing dependency before the user tries for real
        installer.check_dependencies()?;
        cli::print_plan(&installer.plan_install());
        return Ok(());
    }

    let report = installer.install()?;
    info!("State after install: {}", installer.state());
    print_report(&report);
    Ok(())
}

fn print_report(report: &InstallReport) {
    if report.state_before == InstallState::Installed && report.written.is_empty() {
        println!("Wave notes setup is already up to date.");
    } else {
        println!("Wave notes setup complete.");
    }
    println!("  Notes directory: {}", report.paths.notes_dir.display());
    println!("  Bin directory:   {}", report.paths.bin_dir.display());
    println!("  Helper command:  {}", report.paths.shim_path().display());
    if !report.bin_dir_on_path {
        println!();
        println!("Note: {} is not on your PATH. Add it to your shell profile:", report.paths.bin_dir.display());
        println!("  export PATH=\"{}:$PATH\"", report.paths.bin_dir.display());
    }
    println!();
    println!("To uninstall, run: {}", UNINSTALL_NAME);
}
