pub mod constants;
pub mod error;

pub use error::{Error, Result};

use semver::Version;

/// The `<name> v<semver>` identity line for one of the binaries.
pub fn version_string(binary: &str) -> String {
    format!("{} v{}", binary, constants::APP_VERSION)
}

/// Parsed form of [`constants::APP_VERSION`].
pub fn app_version() -> Result<Version> {
    Version::parse(constants::APP_VERSION)
        .map_err(|e| Error::Other(format!("Embedded version '{}' is not semver: {}", constants::APP_VERSION, e)))
}

#[cfg(test)]
mod tests;
