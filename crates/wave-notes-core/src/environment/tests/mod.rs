use std::ffi::OsString;
use std::fs;
use std::path::Path;

use tempfile::tempdir;

use crate::environment::DependencyCheck;
use crate::kernel::error::Error;

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::write(path, "#!/bin/sh\nexit 0\n").unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(path: &Path) {
    fs::write(path, "").unwrap();
}

#[test]
fn test_require_searches_path_in_order() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    make_executable(&second.path().join("jq"));

    let path_var = std::env::join_paths([first.path(), second.path()]).unwrap();
    let check = DependencyCheck::with_path(&path_var);
    assert_eq!(check.require("jq").unwrap(), second.path().join("jq"));

    make_executable(&first.path().join("jq"));
    assert_eq!(check.require("jq").unwrap(), first.path().join("jq"));
}

#[test]
fn test_require_skips_directories() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("jq")).unwrap();
    let check = DependencyCheck::with_path(dir.path().as_os_str());
    assert!(matches!(check.require("jq"), Err(Error::DependencyMissing { .. })));
}

#[cfg(unix)]
#[test]
fn test_require_needs_exec_bit() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("jq"), "not executable").unwrap();
    let check = DependencyCheck::with_path(dir.path().as_os_str());
    assert!(matches!(check.require("jq"), Err(Error::DependencyMissing { .. })));
}

#[test]
fn test_require_reports_missing_dependency() {
    let empty = tempdir().unwrap();
    let check = DependencyCheck::with_path(empty.path().as_os_str());
    match check.require("jq") {
        Err(Error::DependencyMissing { name }) => assert_eq!(name, "jq"),
        other => panic!("Expected DependencyMissing, got {:?}", other),
    }

    // An empty PATH finds nothing either
    let check = DependencyCheck::with_path(OsString::new());
    assert!(check.require_all(&["jq"]).is_err());
}

#[test]
fn test_require_all_and_path_contains() {
    let dir = tempdir().unwrap();
    make_executable(&dir.path().join("jq"));
    let check = DependencyCheck::with_path(dir.path().as_os_str());
    assert!(check.require_all(&["jq"]).is_ok());
    assert!(check.path_contains(dir.path()));
    assert!(!check.path_contains(Path::new("/definitely/not/on/path")));
}
