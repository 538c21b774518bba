//! Editing of the `statusLine` entry inside a settings document.
//!
//! Every function here is pure and total: it inspects only the shapes it
//! names and never fails. Sibling fields under `statusLine` belong to the
//! host (padding, type, future options) and survive every edit except an
//! explicit [`EntryMergeMode::Replace`].

use crate::settings::SettingsDocument;
use serde_json::{Map, Value};

/// Top-level key holding the statusline configuration.
pub const STATUSLINE_KEY: &str = "statusLine";
/// Field inside the entry naming the command to run.
pub const COMMAND_FIELD: &str = "command";
/// Command ccstatus registers for itself.
pub const TOOL_COMMAND: &str = "ccstatus";

/// How `set_command_with` treats an existing object entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryMergeMode {
    /// Overwrite only `command`, keep every sibling field.
    #[default]
    Preserve,
    /// Replace the entry with a fresh object holding only `command`.
    Replace,
}

/// Who currently owns the statusline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    NotConfigured,
    ConfiguredToSelf,
    ConfiguredToOther(String),
}

/// The configured command, or `""` for any missing or unexpected shape.
pub fn get_command(doc: &SettingsDocument) -> &str {
    doc.get(STATUSLINE_KEY)
        .and_then(Value::as_object)
        .and_then(|entry| entry.get(COMMAND_FIELD))
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Whether the entry key exists at all, whatever its shape.
pub fn has_entry(doc: &SettingsDocument) -> bool {
    doc.contains_key(STATUSLINE_KEY)
}

pub fn is_command_equal_to(doc: &SettingsDocument, value: &str) -> bool {
    get_command(doc) == value
}

/// Set the command, preserving sibling fields.
pub fn set_command(doc: &mut SettingsDocument, command: &str) {
    set_command_with(doc, command, EntryMergeMode::Preserve);
}

/// Set the command using an explicit merge mode.
///
/// A non-object entry is always replaced: malformed foreign data is not kept.
pub fn set_command_with(doc: &mut SettingsDocument, command: &str, mode: EntryMergeMode) {
    if mode == EntryMergeMode::Preserve
        && let Some(Value::Object(entry)) = doc.get_mut(STATUSLINE_KEY)
    {
        entry.insert(COMMAND_FIELD.to_string(), Value::String(command.to_string()));
        return;
    }

    let mut entry = Map::new();
    entry.insert(COMMAND_FIELD.to_string(), Value::String(command.to_string()));
    doc.insert(STATUSLINE_KEY.to_string(), Value::Object(entry));
}

/// Remove the command; drop the entry when nothing else is left in it.
pub fn remove_command(doc: &mut SettingsDocument) {
    let drop_entry = match doc.get_mut(STATUSLINE_KEY) {
        None => return,
        Some(Value::Object(entry)) => {
            entry.remove(COMMAND_FIELD);
            entry.is_empty()
        }
        Some(_) => true,
    };
    if drop_entry {
        doc.remove(STATUSLINE_KEY);
    }
}

/// Classify the entry relative to `own_command`.
pub fn entry_state(doc: &SettingsDocument, own_command: &str) -> EntryState {
    match get_command(doc) {
        "" => EntryState::NotConfigured,
        cmd if cmd == own_command => EntryState::ConfiguredToSelf,
        cmd => EntryState::ConfiguredToOther(cmd.to_string()),
    }
}
