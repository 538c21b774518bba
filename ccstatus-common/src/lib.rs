//! Shared library for ccstatus.
//!
//! Holds the settings mutation engine (store, backups, statusline entry
//! editor) and the statusline renderer with its collaborators.

pub mod backup;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod logging;
pub mod paths;
pub mod preferences;
pub mod render;
pub mod settings;
pub mod statusline_entry;
pub mod testing;
pub mod usage;
pub mod util;

pub use backup::{BackupInfo, BackupManager};
pub use config::RuntimeConfig;
pub use credentials::{ChainedCredentials, CredentialSource};
pub use errors::{CredentialError, SettingsError, UsageError};
pub use paths::ClaudePaths;
pub use preferences::{DisplayPreferences, PreferenceToggle};
pub use settings::{SettingsDocument, SettingsStore};
pub use statusline_entry::{EntryMergeMode, EntryState, TOOL_COMMAND};
pub use usage::{UsageClient, UsageResponse};
