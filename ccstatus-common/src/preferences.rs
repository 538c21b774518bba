//! Display preferences stored in `~/.claude/ccstatus.json`.
//!
//! The renderer must never fail because of this file: a missing or corrupt
//! file yields the defaults, and a missing field yields that field's default.

use crate::errors::SettingsError;
use crate::paths::ClaudePaths;
use crate::util::atomic_write;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

fn default_true() -> bool {
    true
}

/// Which statusline segments to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPreferences {
    #[serde(default = "default_true")]
    pub show_session_usage: bool,
    #[serde(default = "default_true")]
    pub show_weekly_usage: bool,
    #[serde(default = "default_true")]
    pub show_reset_times: bool,
    #[serde(default)]
    pub show_git_branch: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            show_session_usage: true,
            show_weekly_usage: true,
            show_reset_times: true,
            show_git_branch: false,
        }
    }
}

/// Toggle identifiers, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceToggle {
    SessionUsage,
    WeeklyUsage,
    ResetTimes,
    GitBranch,
}

impl PreferenceToggle {
    pub const ALL: [PreferenceToggle; 4] = [
        PreferenceToggle::SessionUsage,
        PreferenceToggle::WeeklyUsage,
        PreferenceToggle::ResetTimes,
        PreferenceToggle::GitBranch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SessionUsage => "Session Usage",
            Self::WeeklyUsage => "Weekly Usage",
            Self::ResetTimes => "Reset Times",
            Self::GitBranch => "Git Branch",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::SessionUsage => "Show current session usage percentage",
            Self::WeeklyUsage => "Show weekly usage percentage",
            Self::ResetTimes => "Show when usage limits reset",
            Self::GitBranch => "Show current git branch name",
        }
    }
}

impl DisplayPreferences {
    pub fn get(&self, toggle: PreferenceToggle) -> bool {
        match toggle {
            PreferenceToggle::SessionUsage => self.show_session_usage,
            PreferenceToggle::WeeklyUsage => self.show_weekly_usage,
            PreferenceToggle::ResetTimes => self.show_reset_times,
            PreferenceToggle::GitBranch => self.show_git_branch,
        }
    }

    pub fn set(&mut self, toggle: PreferenceToggle, enabled: bool) {
        let slot = match toggle {
            PreferenceToggle::SessionUsage => &mut self.show_session_usage,
            PreferenceToggle::WeeklyUsage => &mut self.show_weekly_usage,
            PreferenceToggle::ResetTimes => &mut self.show_reset_times,
            PreferenceToggle::GitBranch => &mut self.show_git_branch,
        };
        *slot = enabled;
    }

    /// Strict load: missing file is the defaults, anything else unreadable is an error.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(SettingsError::io("read", path, e)),
        };
        serde_json::from_slice(&bytes).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Lenient load used by the renderer: every failure degrades to defaults.
    pub fn load_or_default(paths: &ClaudePaths) -> Self {
        let path = paths.preferences_file();
        Self::load_from(&path).unwrap_or_else(|e| {
            warn!(error = %e, "using default display preferences");
            Self::default()
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let mut content =
            serde_json::to_string_pretty(self).map_err(|source| SettingsError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;
        content.push('\n');
        atomic_write(path, content.as_bytes())
    }
}
