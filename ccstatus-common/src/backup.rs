//! Timestamped snapshots of the settings file.
//!
//! Snapshots live next to the live file as
//! `settings.backup.<YYYYmmdd-HHMMSS>.json`. They are byte-identical copies,
//! are never modified after creation, and are never pruned by ccstatus.

use crate::errors::SettingsError;
use crate::paths::{BACKUP_PREFIX, ClaudePaths};
use crate::util::{atomic_write, parse_object};
use chrono::Local;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// Timestamp layout used in snapshot names (second resolution, sortable).
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// One snapshot on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Creates, finds, and restores snapshots of one settings file.
#[derive(Debug, Clone)]
pub struct BackupManager {
    settings_path: PathBuf,
}

impl BackupManager {
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: settings_path.into(),
        }
    }

    /// Manager for `~/.claude/settings.json`.
    pub fn locate() -> Result<Self, SettingsError> {
        Ok(Self::new(ClaudePaths::locate()?.settings_file()))
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Directory holding both the live file and its snapshots.
    pub fn backup_dir(&self) -> &Path {
        match self.settings_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Snapshot the live file.
    ///
    /// Returns `Ok(None)` when there is no live file to copy.
    pub fn create_backup(&self) -> Result<Option<PathBuf>, SettingsError> {
        let data = match fs::read(&self.settings_path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.settings_path.display(), "nothing to back up");
                return Ok(None);
            }
            Err(e) => return Err(SettingsError::io("read", &self.settings_path, e)),
        };

        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_path = self.unused_backup_path(&timestamp);

        // create_new: never clobber a snapshot that appeared since the name was picked
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&backup_path)
            .and_then(|mut file| {
                use std::io::Write;
                file.write_all(&data)?;
                file.sync_all()
            })
            .map_err(|e| SettingsError::io("write backup", &backup_path, e))?;

        info!(backup = %backup_path.display(), bytes = data.len(), "settings backup created");
        Ok(Some(backup_path))
    }

    fn unused_backup_path(&self, timestamp: &str) -> PathBuf {
        let dir = self.backup_dir();
        let mut candidate = dir.join(format!("{BACKUP_PREFIX}.{timestamp}.json"));
        let mut counter = 1u32;
        while candidate.exists() {
            candidate = dir.join(format!("{BACKUP_PREFIX}.{timestamp}-{counter}.json"));
            counter += 1;
        }
        candidate
    }

    /// Every snapshot in the settings directory, oldest first.
    ///
    /// Ordering is by modification time, then by file name, so the result is
    /// deterministic even when timestamps collide.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>, SettingsError> {
        let dir = self.backup_dir();
        let entries = fs::read_dir(dir).map_err(|e| SettingsError::io("read directory", dir, e))?;

        let mut backups = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.len() <= BACKUP_PREFIX.len() || !name.starts_with(BACKUP_PREFIX) {
                continue;
            }
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            if !meta.is_file() {
                continue;
            }
            let Ok(modified) = meta.modified() else {
                continue;
            };
            backups.push(BackupInfo {
                path: entry.path(),
                modified,
            });
        }

        backups.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.path.cmp(&b.path)));
        Ok(backups)
    }

    /// The snapshot with the most recent modification time.
    pub fn latest_backup(&self) -> Result<PathBuf, SettingsError> {
        let not_found = || SettingsError::NoBackupFound {
            dir: self.backup_dir().to_path_buf(),
        };
        let backups = self.list_backups().map_err(|e| {
            debug!(error = %e, "cannot scan for backups");
            not_found()
        })?;
        backups.into_iter().last().map(|b| b.path).ok_or_else(not_found)
    }

    /// Replace the live settings file with a snapshot's exact bytes.
    ///
    /// The snapshot must parse as a JSON object; otherwise the live file is
    /// left untouched.
    pub fn restore(&self, backup_path: &Path) -> Result<(), SettingsError> {
        let data =
            fs::read(backup_path).map_err(|e| SettingsError::io("read backup", backup_path, e))?;

        parse_object(&data).map_err(|reason| SettingsError::InvalidBackup {
            path: backup_path.to_path_buf(),
            reason,
        })?;

        atomic_write(&self.settings_path, &data)?;
        info!(
            backup = %backup_path.display(),
            settings = %self.settings_path.display(),
            "settings restored from backup"
        );
        Ok(())
    }
}
