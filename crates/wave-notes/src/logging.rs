//! Logging setup shared by both binaries.
//!
//! The core library logs through the `log` facade; records are bridged into
//! a `tracing` fmt subscriber on stderr so stdout carries only the
//! user-facing report.
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `debug`
pub const LOG_ENV_VAR: &str = "WAVE_NOTES_LOG";

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber. `verbosity` is the number of `-v` flags;
/// `WAVE_NOTES_LOG` takes precedence when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("warning: failed to bridge log records: {}", e);
    }

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }
}
