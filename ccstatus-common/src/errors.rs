//! Error types for the settings, usage, and credential layers.
//!
//! Settings and backup failures are always surfaced to the caller. Usage and
//! credential failures are expected to be absorbed by the statusline renderer,
//! which must print *some* line no matter what.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors from the settings store, backup manager, and preferences file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The user's home directory could not be determined.
    #[error("cannot determine home directory")]
    HomeDirUnresolvable,

    /// A filesystem operation failed.
    #[error("cannot {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON or its top level is not an object.
    #[error("cannot parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// A document could not be serialized.
    #[error("cannot serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A backup failed validation before it was restored.
    #[error("backup {} is not a valid settings file: {reason}", path.display())]
    InvalidBackup { path: PathBuf, reason: String },

    /// No backup snapshot exists.
    #[error("no backup files found in {}", dir.display())]
    NoBackupFound { dir: PathBuf },
}

impl SettingsError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Errors from the usage API call.
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("usage request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("usage request failed: {0}")]
    Network(String),

    #[error("usage API returned HTTP {0}")]
    Status(u16),

    #[error("cannot decode usage response: {0}")]
    Decode(String),

    /// The API answered with an `error` object instead of usage data.
    #[error("usage API error: {0}")]
    Api(String),
}

/// Errors from OAuth token retrieval.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No credential source produced anything.
    #[error("credentials unavailable: {0}")]
    Unavailable(String),

    #[error("credentials are malformed: {0}")]
    Malformed(String),

    #[error("credentials contain an empty access token")]
    EmptyToken,
}
