//! Shared filesystem and JSON helpers.

use crate::errors::SettingsError;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Write `contents` to `path` through a temporary sibling file and an atomic
/// rename, so readers see either the old file or the new one.
///
/// A symlinked `path` is written through: the link stays and its target is
/// replaced. Parent directories are created as needed. An existing file's
/// permissions carry over to the replacement.
pub fn atomic_write(path: &Path, contents: &[u8]) -> Result<(), SettingsError> {
    let target = resolve_symlink(path);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| SettingsError::io("create directory", dir, e))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".ccstatus-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| SettingsError::io("create temporary file in", dir, e))?;

    tmp.write_all(contents)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| SettingsError::io("write", tmp.path().to_path_buf(), e))?;

    match fs::metadata(&target) {
        Ok(meta) => {
            if let Err(e) = fs::set_permissions(tmp.path(), meta.permissions()) {
                warn!(path = %target.display(), error = %e, "could not carry over file permissions");
            }
        }
        Err(_) => set_default_permissions(tmp.path()),
    }

    tmp.persist(&target)
        .map_err(|e| SettingsError::io("replace", target.as_path(), e.error))?;
    Ok(())
}

/// Final target of `path` when it is a symlink, otherwise `path` itself.
///
/// A dangling link cannot be resolved and is replaced like a regular file.
fn resolve_symlink(path: &Path) -> PathBuf {
    let is_link = fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_symlink())
        .unwrap_or(false);
    if !is_link {
        return path.to_path_buf();
    }
    match fs::canonicalize(path) {
        Ok(resolved) => {
            debug!(link = %path.display(), target = %resolved.display(), "writing through symlink");
            resolved
        }
        Err(e) => {
            warn!(link = %path.display(), error = %e, "cannot resolve symlink, replacing it");
            path.to_path_buf()
        }
    }
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o644)) {
        debug!(path = %path.display(), error = %e, "could not set default permissions");
    }
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) {}

/// Parse raw bytes as a JSON object, describing why when they are not one.
pub fn parse_object(bytes: &[u8]) -> Result<Map<String, Value>, String> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!(
            "top level is {} instead of an object",
            json_kind(&other)
        )),
        Err(e) => Err(e.to_string()),
    }
}

/// Short human name of a JSON value's type.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
