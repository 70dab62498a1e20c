use crate::kernel::constants::{APP_VERSION, OWNERSHIP_MARKER, SHIM_NAME, UNINSTALL_NAME};
use crate::storage::paths::ResolvedPaths;

/// Quote `value` for a POSIX shell single-quoted string.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Contents of the `wave-notes` helper placed in the bin directory.
///
/// Output depends only on the resolved paths, so reinstalling with the same
/// configuration rewrites identical bytes.
pub fn render(paths: &ResolvedPaths) -> String {
    let notes_dir = shell_quote(&paths.notes_dir.to_string_lossy());
    format!(
        r#"#!/bin/sh
{marker}
# {name} v{version}: open notes kept in the Wave notes directory.
# Remove with {uninstall}.
NOTES_DIR={notes_dir}

case "${{1:-}}" in
  --dir)
    printf '%s\n' "$NOTES_DIR"
    ;;
  --version)
    printf '%s\n' "{name} v{version}"
    ;;
  *)
    mkdir -p "$NOTES_DIR" || exit 1
    exec "${{EDITOR:-vi}}" "$NOTES_DIR/${{1:-scratch}}.md"
    ;;
esac
"#,
        marker = OWNERSHIP_MARKER,
        name = SHIM_NAME,
        version = APP_VERSION,
        uninstall = UNINSTALL_NAME,
        notes_dir = notes_dir,
    )
}
