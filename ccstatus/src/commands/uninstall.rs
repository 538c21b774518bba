//! `ccstatus uninstall`: remove the registration or roll back to a backup.
//!
//! A statusline command that is not ours is never touched.

use super::helpers::file_name;
use crate::prompt::{AssumeYes, DialoguerPrompter, Prompter};
use crate::ui::{Spinner, StatusIndicator, Theme};
use anyhow::{Context, Result};
use ccstatus_common::statusline_entry::{EntryState, TOOL_COMMAND, entry_state, remove_command};
use ccstatus_common::{BackupManager, SettingsDocument, SettingsStore};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const RESTORE_OPTION: &str = "Restore from backup (recommended)";
const REMOVE_OPTION: &str = "Remove statusline configuration only";
const CANCEL_OPTION: &str = "Cancel";

/// Uninstall path chosen up front from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UninstallAction {
    Restore,
    RemoveOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    NoSettingsFile,
    NotConfigured,
    /// Someone else owns the statusline.
    ForeignCommand(String),
    Cancelled,
    Restored {
        backup: PathBuf,
    },
    Removed {
        safety_backup: Option<PathBuf>,
    },
}

pub fn run(yes: bool, restore: bool) -> Result<()> {
    let store = SettingsStore::locate().context("cannot locate Claude Code settings")?;
    let backups = BackupManager::new(store.path());
    let theme = Theme::default();

    let preset = match (restore, yes) {
        (true, _) => Some(UninstallAction::Restore),
        (false, true) => Some(UninstallAction::RemoveOnly),
        (false, false) => None,
    };

    let outcome = if yes {
        uninstall_with(&store, &backups, &mut AssumeYes, preset, &theme)?
    } else {
        uninstall_with(&store, &backups, &mut DialoguerPrompter::new(), preset, &theme)?
    };
    debug!(?outcome, "uninstall finished");
    Ok(())
}

fn cancelled(theme: &Theme) -> UninstallOutcome {
    println!("{}", theme.warning("Uninstall cancelled", "No changes were made."));
    println!();
    UninstallOutcome::Cancelled
}

pub fn uninstall_with(
    store: &SettingsStore,
    backups: &BackupManager,
    prompter: &mut dyn Prompter,
    preset: Option<UninstallAction>,
    theme: &Theme,
) -> Result<UninstallOutcome> {
    println!("{}", theme.title("ccstatus uninstall"));

    let spinner = Spinner::start("Checking current configuration...");
    if !store.exists().context("failed to check settings file")? {
        spinner.stop();
        println!(
            "{}",
            theme.warning(
                "No configuration found",
                "Claude Code settings file does not exist."
            )
        );
        println!("{}", theme.hint("Nothing to uninstall."));
        println!();
        return Ok(UninstallOutcome::NoSettingsFile);
    }
    let doc = store
        .load()
        .with_context(|| format!("failed to read {}", store.path().display()))?;
    spinner.stop();

    println!();
    println!("{}", theme.heading("Current Status"));
    println!();

    match entry_state(&doc, TOOL_COMMAND) {
        EntryState::NotConfigured => {
            println!(
                "{}",
                theme.status(StatusIndicator::Info, "Statusline", "Not configured")
            );
            println!("{}", theme.hint("Nothing to uninstall."));
            println!();
            return Ok(UninstallOutcome::NotConfigured);
        }
        EntryState::ConfiguredToOther(current) => {
            println!(
                "{}",
                theme.status(StatusIndicator::Warning, "Statusline", &current)
            );
            println!("{}", theme.hint("ccstatus is not the configured statusline."));
            println!("{}", theme.hint("Nothing to uninstall."));
            println!();
            return Ok(UninstallOutcome::ForeignCommand(current));
        }
        EntryState::ConfiguredToSelf => {
            println!(
                "{}",
                theme.status(StatusIndicator::Ok, "Statusline", "ccstatus (installed)")
            );
        }
    }

    let spinner = Spinner::start("Checking for backups...");
    let latest = backups.latest_backup();
    spinner.stop();

    println!();
    println!("{}", theme.heading("Uninstall Options"));
    println!();

    let latest = match latest {
        Ok(path) => {
            println!(
                "{}",
                theme.status(
                    StatusIndicator::Ok,
                    "Backup found",
                    &path.display().to_string()
                )
            );
            Some(path)
        }
        Err(e) => {
            debug!(error = %e, "no backup available");
            println!(
                "{}",
                theme.status(StatusIndicator::Warning, "No backup found", "")
            );
            None
        }
    };

    let action = match (&latest, preset) {
        (_, Some(UninstallAction::RemoveOnly)) => UninstallAction::RemoveOnly,
        (Some(_), Some(UninstallAction::Restore)) => UninstallAction::Restore,
        (None, Some(UninstallAction::Restore)) => {
            anyhow::bail!(
                "no backup to restore in {}",
                backups.backup_dir().display()
            );
        }
        (Some(_), None) => {
            let options = [RESTORE_OPTION, REMOVE_OPTION, CANCEL_OPTION];
            match prompter.choose("How would you like to proceed?", &options, 0) {
                Some(0) => UninstallAction::Restore,
                Some(1) => UninstallAction::RemoveOnly,
                _ => return Ok(cancelled(theme)),
            }
        }
        (None, None) => UninstallAction::RemoveOnly,
    };

    match (action, latest) {
        (UninstallAction::Restore, Some(backup)) => {
            restore_from_backup(backups, &backup, prompter, theme)
        }
        (_, Some(_)) => remove_statusline(store, backups, doc, theme),
        (_, None) => {
            println!("{}", theme.hint("The statusline configuration will be removed."));
            println!("{}", theme.hint("Other settings will remain unchanged."));
            if !prompter.confirm("Remove statusline configuration?", false) {
                return Ok(cancelled(theme));
            }
            remove_statusline(store, backups, doc, theme)
        }
    }
}

fn restore_from_backup(
    backups: &BackupManager,
    backup: &Path,
    prompter: &mut dyn Prompter,
    theme: &Theme,
) -> Result<UninstallOutcome> {
    if !prompter.confirm("Restore configuration from backup?", true) {
        return Ok(cancelled(theme));
    }

    let spinner = Spinner::start("Restoring from backup...");
    backups
        .restore(backup)
        .with_context(|| format!("failed to restore from {}", file_name(backup)))?;
    spinner.stop();
    info!(backup = %backup.display(), "settings restored");

    println!(
        "{}",
        theme.status(StatusIndicator::Ok, "Configuration restored", &file_name(backup))
    );
    println!(
        "{}",
        theme.success(
            "Uninstall complete!",
            "Your previous configuration has been restored. Restart Claude Code to see the changes."
        )
    );
    println!();

    Ok(UninstallOutcome::Restored {
        backup: backup.to_path_buf(),
    })
}

fn remove_statusline(
    store: &SettingsStore,
    backups: &BackupManager,
    mut doc: SettingsDocument,
    theme: &Theme,
) -> Result<UninstallOutcome> {
    println!();
    let spinner = Spinner::start("Creating safety backup...");
    let safety_backup = backups
        .create_backup()
        .context("failed to create safety backup; settings were not modified")?;
    spinner.stop();
    if let Some(path) = &safety_backup {
        println!(
            "{}",
            theme.status(
                StatusIndicator::Ok,
                "Safety backup created",
                &path.display().to_string()
            )
        );
    }

    let spinner = Spinner::start("Removing statusline configuration...");
    remove_command(&mut doc);
    store
        .save(&doc)
        .context("failed to write settings")?;
    spinner.stop();
    info!(settings = %store.path().display(), "statusline removed");

    println!(
        "{}",
        theme.status(StatusIndicator::Ok, "Statusline configuration removed", "")
    );
    println!(
        "{}",
        theme.success(
            "Uninstall complete!",
            "ccstatus has been removed from your configuration. Restart Claude Code to see the changes."
        )
    );
    println!();

    Ok(UninstallOutcome::Removed { safety_backup })
}
