//! `ccstatus install`: register ccstatus as the Claude Code statusline.

use super::helpers::indent_lines;
use crate::prompt::{AssumeYes, DialoguerPrompter, Prompter};
use crate::ui::{Spinner, StatusIndicator, Theme};
use anyhow::{Context, Result};
use ccstatus_common::statusline_entry::{
    EntryMergeMode, EntryState, STATUSLINE_KEY, TOOL_COMMAND, entry_state, set_command_with,
};
use ccstatus_common::util::json_kind;
use ccstatus_common::{BackupManager, SettingsStore};
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{debug, info};

/// How an install run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyInstalled,
    Cancelled,
    Installed {
        backup: Option<PathBuf>,
        /// The foreign command that was replaced, if any.
        replaced: Option<String>,
    },
}

pub fn run(yes: bool, replace_entry: bool) -> Result<()> {
    let store = SettingsStore::locate().context("cannot locate Claude Code settings")?;
    let backups = BackupManager::new(store.path());
    let mode = if replace_entry {
        EntryMergeMode::Replace
    } else {
        EntryMergeMode::Preserve
    };
    let theme = Theme::default();

    let outcome = if yes {
        install_with(&store, &backups, &mut AssumeYes, mode, &theme)?
    } else {
        install_with(&store, &backups, &mut DialoguerPrompter::new(), mode, &theme)?
    };
    debug!(?outcome, "install finished");
    Ok(())
}

/// Describes an existing `statusLine` value that install will overwrite
/// without it counting as a command.
fn discarded_value(doc: &Map<String, Value>) -> Option<String> {
    match doc.get(STATUSLINE_KEY)? {
        Value::Object(entry) => match entry.get("command") {
            Some(command) if !command.is_string() => Some(format!(
                "statusLine.command is {} and will be replaced",
                json_kind(command)
            )),
            _ => None,
        },
        other => Some(format!(
            "statusLine is {} and will be replaced",
            json_kind(other)
        )),
    }
}

/// The JSON fragment the user is shown before confirming.
fn entry_preview(doc: &Map<String, Value>, mode: EntryMergeMode) -> String {
    let mut preview_doc = doc.clone();
    set_command_with(&mut preview_doc, TOOL_COMMAND, mode);
    let mut preview = Map::new();
    if let Some(entry) = preview_doc.remove(STATUSLINE_KEY) {
        preview.insert(STATUSLINE_KEY.to_string(), entry);
    }
    serde_json::to_string_pretty(&Value::Object(preview)).unwrap_or_default()
}

pub fn install_with(
    store: &SettingsStore,
    backups: &BackupManager,
    prompter: &mut dyn Prompter,
    mode: EntryMergeMode,
    theme: &Theme,
) -> Result<InstallOutcome> {
    println!("{}", theme.title("ccstatus install"));
    println!();

    let spinner = Spinner::start("Checking Claude Code configuration...");
    let exists = store.exists().context("failed to check settings file")?;
    let mut doc = store
        .load()
        .with_context(|| format!("failed to read {}", store.path().display()))?;
    spinner.stop();

    println!(
        "{}",
        theme.status(
            StatusIndicator::Info,
            "Config location",
            &store.path().display().to_string()
        )
    );
    println!(
        "{}",
        theme.status(
            StatusIndicator::Info,
            "Status",
            if exists {
                "Found"
            } else {
                "Not found (will be created)"
            }
        )
    );
    println!();

    let replaced = match entry_state(&doc, TOOL_COMMAND) {
        EntryState::ConfiguredToSelf => {
            println!(
                "{}",
                theme.success(
                    "ccstatus is already configured as the statusline command.",
                    "No changes needed."
                )
            );
            println!();
            return Ok(InstallOutcome::AlreadyInstalled);
        }
        EntryState::ConfiguredToOther(current) => {
            println!(
                "{}",
                theme.status(StatusIndicator::Warning, "Current statusline command", &current)
            );
            println!();
            Some(current)
        }
        EntryState::NotConfigured => None,
    };

    println!("{}", theme.heading("The following changes will be made"));
    println!();
    let mut step = 1;
    if exists {
        println!("  {step}. Create a backup of your current settings");
        step += 1;
    }
    match &replaced {
        Some(current) => {
            println!("  {step}. Replace statusline command: {current} -> {TOOL_COMMAND}");
            if mode == EntryMergeMode::Replace {
                println!(
                    "{}",
                    theme.hint("     Other statusLine fields will be dropped (--replace-entry).")
                );
            }
        }
        None => {
            if let Some(warning) = discarded_value(&doc) {
                println!(
                    "{}",
                    theme.status(StatusIndicator::Warning, "Unrecognized statusLine", &warning)
                );
                println!();
            }
            println!("  {step}. Add statusline configuration:");
            println!("{}", indent_lines(&entry_preview(&doc, mode), "     "));
        }
    }
    println!();

    if !prompter.confirm("Do you want to proceed?", false) {
        println!("{}", theme.warning("Installation cancelled", "No changes were made."));
        println!();
        return Ok(InstallOutcome::Cancelled);
    }

    let backup = if exists {
        let spinner = Spinner::start("Creating backup...");
        let backup = backups
            .create_backup()
            .context("failed to create backup; settings were not modified")?;
        spinner.stop();
        if let Some(path) = &backup {
            println!(
                "{}",
                theme.status(
                    StatusIndicator::Ok,
                    "Backup created",
                    &path.display().to_string()
                )
            );
        }
        backup
    } else {
        None
    };

    let spinner = Spinner::start("Updating configuration...");
    set_command_with(&mut doc, TOOL_COMMAND, mode);
    store.save(&doc).with_context(|| match &backup {
        Some(path) => format!(
            "failed to write settings (backup kept at {})",
            path.display()
        ),
        None => "failed to write settings".to_string(),
    })?;
    spinner.stop();
    info!(settings = %store.path().display(), "statusline installed");

    println!(
        "{}",
        theme.status(StatusIndicator::Ok, "Configuration updated", "")
    );
    println!(
        "{}",
        theme.success(
            "Installation complete!",
            "Restart Claude Code to see the changes."
        )
    );
    println!();

    Ok(InstallOutcome::Installed { backup, replaced })
}
