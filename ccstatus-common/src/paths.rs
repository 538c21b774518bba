//! Well-known locations under `~/.claude`.

use crate::errors::SettingsError;
use std::path::{Path, PathBuf};

/// Claude Code configuration directory name.
pub const CONFIG_DIR: &str = ".claude";
/// Host settings file name.
pub const SETTINGS_FILE: &str = "settings.json";
/// Prefix shared by every backup snapshot.
pub const BACKUP_PREFIX: &str = "settings.backup";
/// Display preferences file owned by ccstatus.
pub const PREFERENCES_FILE: &str = "ccstatus.json";
/// Credentials file written by Claude Code on platforms without a keychain.
pub const CREDENTIALS_FILE: &str = ".credentials.json";

/// Resolved paths for one home directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaudePaths {
    dir: PathBuf,
}

impl ClaudePaths {
    /// Resolve paths from the current user's home directory.
    pub fn locate() -> Result<Self, SettingsError> {
        let home = dirs::home_dir().ok_or(SettingsError::HomeDirUnresolvable)?;
        Ok(Self::from_home(home))
    }

    /// Paths rooted at an explicit home directory.
    pub fn from_home(home: impl AsRef<Path>) -> Self {
        Self {
            dir: home.as_ref().join(CONFIG_DIR),
        }
    }

    /// `~/.claude`
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn settings_file(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE)
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.dir.join(CREDENTIALS_FILE)
    }
}
