use std::io;
use std::path::PathBuf;

use crate::kernel::constants::{APP_NAME, APP_VERSION, UNINSTALL_NAME};
use crate::kernel::error::{Error, EXIT_CONFIG, EXIT_DEPENDENCY_MISSING, EXIT_FAILURE, EXIT_PERMISSION};
use crate::kernel::{app_version, version_string};
use crate::storage::error::ConfigError;

#[test]
fn test_version_string_format() {
    let line = version_string(APP_NAME);
    assert_eq!(line, format!("wave-notes-setup v{}", APP_VERSION));
    // Stable across calls
    assert_eq!(line, version_string(APP_NAME));

    let rest = line.strip_prefix("wave-notes-setup v").expect("missing prefix");
    let parts: Vec<&str> = rest.split('.').collect();
    assert_eq!(parts.len(), 3, "Expected major.minor.patch, got {}", rest);
    assert!(parts.iter().all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit())));
}

#[test]
fn test_uninstall_version_string_shares_version() {
    assert_eq!(version_string(UNINSTALL_NAME), format!("wave-notes-uninstall v{}", APP_VERSION));
}

#[test]
fn test_app_version_is_semver() {
    let version = app_version().expect("embedded version must parse");
    assert_eq!(version.to_string(), APP_VERSION);
    assert!(version.pre.is_empty());
}

#[test]
fn test_io_permission_denied_maps_to_permission_error() {
    let err = Error::io(
        io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        "create_dir_all",
        PathBuf::from("/root/locked"),
    );
    assert!(err.is_permission());
    assert_eq!(err.exit_code(), EXIT_PERMISSION);
    let msg = err.to_string();
    assert!(msg.contains("create_dir_all"), "message was: {}", msg);
    assert!(msg.contains("/root/locked"), "message was: {}", msg);
}

#[test]
fn test_io_other_kind_stays_io() {
    let err = Error::io(io::Error::new(io::ErrorKind::Other, "boom"), "read_dir", PathBuf::from("/tmp/x"));
    assert!(matches!(err, Error::Io { .. }));
    assert_eq!(err.exit_code(), EXIT_FAILURE);
}

#[test]
fn test_exit_codes_per_kind() {
    let missing = Error::DependencyMissing { name: "jq".to_string() };
    assert_eq!(missing.exit_code(), EXIT_DEPENDENCY_MISSING);
    assert!(missing.to_string().contains("'jq'"));

    let config: Error = ConfigError::EmptyValue {
        path: PathBuf::from("/home/u/.wave-notes.conf"),
        line: 3,
        key: "BIN_DIR".to_string(),
    }
    .into();
    assert_eq!(config.exit_code(), EXIT_CONFIG);
    assert!(config.to_string().contains(".wave-notes.conf:3"));

    assert_eq!(Error::Other("other".to_string()).exit_code(), EXIT_FAILURE);
    assert_eq!(Error::HomeDirUnavailable.exit_code(), EXIT_FAILURE);
}
