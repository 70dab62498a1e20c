use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::kernel::constants::CONFIG_FILE_NAME;
use crate::kernel::error::{Error, Result};
use crate::storage::error::ConfigError;

/// Key overriding the notes directory
pub const KEY_NOTES_DIR: &str = "NOTES_DIR";
/// Key overriding the helper script directory
pub const KEY_BIN_DIR: &str = "BIN_DIR";

/// User configuration read from `~/.wave-notes.conf`.
///
/// The file uses shell variable syntax:
///
/// ```text
/// NOTES_DIR="$HOME/Documents/WaveNotes"
/// BIN_DIR="$HOME/bin"
/// ```
///
/// Only `NOTES_DIR` and `BIN_DIR` are recognized; anything else is ignored.
/// The tool never writes this file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaveConfig {
    /// Notes directory override, already expanded and absolute
    pub notes_dir: Option<PathBuf>,
    /// Bin directory override, already expanded and absolute
    pub bin_dir: Option<PathBuf>,
    /// File the values came from, if one was read
    pub(crate) source: Option<PathBuf>,
}

impl WaveConfig {
    /// Location of the configuration file for the given home directory.
    pub fn default_path(home: &Path) -> PathBuf {
        home.join(CONFIG_FILE_NAME)
    }

    /// Load the configuration.
    ///
    /// With `explicit` set, that file must exist. Otherwise the default file
    /// under `home` is read when present and its absence yields an empty
    /// configuration.
    pub fn load(home: &Path, explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(home), false),
        };

        match fs::read(&path) {
            Ok(bytes) => {
                let text = String::from_utf8(bytes)
                    .map_err(|_| ConfigError::InvalidEncoding { path: path.clone() })?;
                let config = Self::parse(&text, &path, home)?;
                debug!("Loaded configuration from {}: {:?}", path.display(), config);
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound && !required => {
                debug!("No configuration file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ConfigError::FileNotFound { path }.into()),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Err(Error::io(e, "read_config", path)),
            Err(e) => Err(ConfigError::Unreadable { path, source: e }.into()),
        }
    }

    /// Parse configuration text. `path` is only used for messages.
    pub fn parse(contents: &str, path: &Path, home: &Path) -> std::result::Result<Self, ConfigError> {
        let mut config = WaveConfig {
            source: Some(path.to_path_buf()),
            ..Self::default()
        };

        for (index, raw_line) in contents.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let assignment = line.strip_prefix("export ").map(str::trim_start).unwrap_or(line);
            let Some((key, raw_value)) = assignment.split_once('=') else {
                warn!("Ignoring malformed line {} in {}: {}", line_no, path.display(), raw_line);
                continue;
            };

            let key = key.trim();
            let slot = match key {
                KEY_NOTES_DIR => &mut config.notes_dir,
                KEY_BIN_DIR => &mut config.bin_dir,
                _ => {
                    debug!("Ignoring unknown key '{}' at {}:{}", key, path.display(), line_no);
                    continue;
                }
            };

            let at = LineRef { path, line: line_no, key };
            let value = parse_value(raw_value, home, &at)?;
            if value.is_empty() {
                return Err(ConfigError::EmptyValue { path: path.to_path_buf(), line: line_no, key: key.to_string() });
            }
            let value_path = PathBuf::from(&value);
            if !value_path.is_absolute() {
                return Err(ConfigError::NotAbsolute {
                    path: path.to_path_buf(),
                    line: line_no,
                    key: key.to_string(),
                    value,
                });
            }
            // Later assignments win, as when the file is sourced by a shell
            *slot = Some(value_path);
        }

        Ok(config)
    }

    /// File the configuration was read from, `None` when defaults apply.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Location of an assignment, for error messages.
struct LineRef<'a> {
    path: &'a Path,
    line: usize,
    key: &'a str,
}

impl LineRef<'_> {
    fn unterminated(&self) -> ConfigError {
        ConfigError::UnterminatedQuote {
            path: self.path.to_path_buf(),
            line: self.line,
            key: self.key.to_string(),
        }
    }
}

/// Strip quotes and expand `$HOME`/`~` the way a shell assignment would.
fn parse_value(raw: &str, home: &Path, at: &LineRef<'_>) -> std::result::Result<String, ConfigError> {
    let raw = raw.trim();

    if let Some(rest) = raw.strip_prefix('\'') {
        // Single quotes are literal
        let end = rest.find('\'').ok_or_else(|| at.unterminated())?;
        return Ok(rest[..end].to_string());
    }

    if let Some(rest) = raw.strip_prefix('"') {
        let end = find_closing_double_quote(rest).ok_or_else(|| at.unterminated())?;
        let inner = rest[..end].replace("\\\"", "\"");
        return expand(&inner, home, at);
    }

    // Unquoted values end at the first whitespace; anything after is a comment
    let word = raw.split_whitespace().next().unwrap_or("");
    expand(word, home, at)
}

fn find_closing_double_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '"' if !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

fn expand(value: &str, home: &Path, at: &LineRef<'_>) -> std::result::Result<String, ConfigError> {
    let home_str = home.to_string_lossy();
    let mut out = String::with_capacity(value.len());

    let mut rest = value;
    if rest == "~" || rest.starts_with("~/") {
        out.push_str(&home_str);
        rest = &rest[1..];
    }

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => return Err(at.unterminated()),
            }
        } else {
            let len = after
                .char_indices()
                .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
                .map(|(i, _)| i)
                .unwrap_or(after.len());
            (&after[..len], len)
        };

        if name.is_empty() {
            // A lone `$` is kept as-is
            out.push('$');
            rest = after;
            continue;
        }
        if name != "HOME" {
            return Err(ConfigError::UnsupportedVariable {
                path: at.path.to_path_buf(),
                line: at.line,
                key: at.key.to_string(),
                var: name.to_string(),
            });
        }
        out.push_str(&home_str);
        rest = &after[consumed..];
    }
    out.push_str(rest);

    Ok(out)
}
