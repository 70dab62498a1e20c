pub mod config;
pub mod error;
pub mod paths;

/// Re-export key types
pub use config::WaveConfig;
pub use error::ConfigError;
pub use paths::{home_dir, ResolvedPaths};
