//! Settings store for the host's `settings.json`.
//!
//! The file belongs to Claude Code and may carry keys written by any other
//! tool. The document is therefore kept as an untyped JSON map: everything
//! ccstatus does not understand is carried through load and save untouched.

use crate::errors::SettingsError;
use crate::paths::ClaudePaths;
use crate::util::{atomic_write, parse_object};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The whole settings file as an open-ended key/value mapping.
pub type SettingsDocument = Map<String, Value>;

/// Reads and writes one settings file.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `~/.claude/settings.json`.
    pub fn locate() -> Result<Self, SettingsError> {
        Ok(Self::new(ClaudePaths::locate()?.settings_file()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the settings file is present.
    ///
    /// Any stat failure other than "not found" is an error, not `false`.
    pub fn exists(&self) -> Result<bool, SettingsError> {
        match fs::metadata(&self.path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SettingsError::io("stat", &self.path, e)),
        }
    }

    /// Load the document. A missing or whitespace-only file is an empty map.
    pub fn load(&self) -> Result<SettingsDocument, SettingsError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "settings file missing, starting empty");
                return Ok(SettingsDocument::new());
            }
            Err(e) => return Err(SettingsError::io("read", &self.path, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(SettingsDocument::new());
        }

        parse_object(&bytes).map_err(|reason| SettingsError::Parse {
            path: self.path.clone(),
            reason,
        })
    }

    /// Serialize with two-space indentation and atomically replace the file.
    pub fn save(&self, doc: &SettingsDocument) -> Result<(), SettingsError> {
        let mut content =
            serde_json::to_string_pretty(doc).map_err(|source| SettingsError::Serialize {
                path: self.path.clone(),
                source,
            })?;
        content.push('\n');
        atomic_write(&self.path, content.as_bytes())?;
        debug!(path = %self.path.display(), keys = doc.len(), "settings saved");
        Ok(())
    }
}
