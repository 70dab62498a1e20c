/// Application name, as printed by `--version`
pub const APP_NAME: &str = "wave-notes-setup";

/// Name of the companion uninstall binary
pub const UNINSTALL_NAME: &str = "wave-notes-uninstall";

/// Application version. Independent of the package-manager release tag.
pub const APP_VERSION: &str = "1.0.0";

/// Configuration file name, looked up in the user's home directory
pub const CONFIG_FILE_NAME: &str = ".wave-notes.conf";

/// Default notes directory, relative to the home directory
pub const DEFAULT_NOTES_SUBDIR: &str = "Documents/WaveNotes";

/// Default helper script directory, relative to the home directory
pub const DEFAULT_BIN_SUBDIR: &str = "bin";

/// Tool state directory, relative to the home directory. Holds the install
/// manifest so uninstall finds it whatever the configuration says.
pub const STATE_DIR_NAME: &str = ".wave-notes";

/// Install manifest file name inside the state directory
pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Helper script placed into the bin directory
pub const SHIM_NAME: &str = "wave-notes";

/// Marker line identifying files owned by this tool
pub const OWNERSHIP_MARKER: &str = "# managed-by: wave-notes-setup";

/// External JSON processor the helper scripts rely on
pub const REQUIRED_DEPENDENCY: &str = "jq";
