//! Statusline rendering.
//!
//! The renderer always produces a line. Credential, network, and decode
//! failures all collapse into the fallback form with `--%` placeholders.

use crate::credentials::CredentialSource;
use crate::preferences::DisplayPreferences;
use crate::usage::{UsageClient, UsageResponse};
use chrono::{DateTime, Local, TimeZone};
use serde::Deserialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Model name used when stdin has none.
pub const UNKNOWN_MODEL: &str = "Unknown";
/// Placeholder for a reset time that cannot be shown.
pub const MISSING_TIME: &str = "--";

const SESSION_RESET_FORMAT: &str = "%-I:%M%P";
const WEEKLY_RESET_FORMAT: &str = "%b %-d %-I:%M%P";

#[derive(Debug, Default, Deserialize)]
struct HookInput {
    #[serde(default)]
    model: Option<ModelInfo>,
    #[serde(default)]
    workspace: Option<WorkspaceInfo>,
    #[serde(default)]
    cwd: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ModelInfo {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WorkspaceInfo {
    #[serde(default)]
    current_dir: Option<String>,
}

/// What the renderer needs from the host's stdin payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatuslineInput {
    pub model: String,
    pub cwd: Option<PathBuf>,
}

impl Default for StatuslineInput {
    fn default() -> Self {
        Self {
            model: UNKNOWN_MODEL.to_string(),
            cwd: None,
        }
    }
}

/// Parse the host payload. Anything unusable yields the defaults.
pub fn parse_input(raw: &str) -> StatuslineInput {
    let input: HookInput = match serde_json::from_str(raw) {
        Ok(input) => input,
        Err(e) => {
            debug!(error = %e, "statusline input is not valid JSON");
            return StatuslineInput::default();
        }
    };

    let model = input
        .model
        .and_then(|m| m.display_name)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_MODEL.to_string());
    let cwd = input
        .workspace
        .and_then(|w| w.current_dir)
        .or(input.cwd)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from);

    StatuslineInput { model, cwd }
}

fn parse_timestamp<Tz: TimeZone>(iso: Option<&str>, tz: &Tz) -> Option<DateTime<Tz>> {
    let iso = iso?.trim();
    if iso.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(iso)
        .map(|t| t.with_timezone(tz))
        .map_err(|e| debug!(value = iso, error = %e, "unparsable reset timestamp"))
        .ok()
}

/// `3:45pm` in `tz`, or `--`.
pub fn format_reset_time<Tz>(iso: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    parse_timestamp(iso, tz)
        .map(|t| t.format(SESSION_RESET_FORMAT).to_string())
        .unwrap_or_else(|| MISSING_TIME.to_string())
}

/// `Jan 15 3:45pm` in `tz`, or `--`.
pub fn format_weekly_reset_time<Tz>(iso: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    parse_timestamp(iso, tz)
        .map(|t| t.format(WEEKLY_RESET_FORMAT).to_string())
        .unwrap_or_else(|| MISSING_TIME.to_string())
}

/// Build the line from whatever data is available.
///
/// `usage` of `None` renders the fallback placeholders.
pub fn render_line<Tz>(
    model: &str,
    usage: Option<&UsageResponse>,
    prefs: &DisplayPreferences,
    branch: Option<&str>,
    tz: &Tz,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut segments = vec![model.to_string()];

    if prefs.show_session_usage {
        segments.push(match usage {
            Some(u) if prefs.show_reset_times => format!(
                "Session: {}% (resets {})",
                u.five_hour.percent(),
                format_reset_time(u.five_hour.resets_at.as_deref(), tz)
            ),
            Some(u) => format!("Session: {}%", u.five_hour.percent()),
            None => "Session: --%".to_string(),
        });
    }

    if prefs.show_weekly_usage {
        segments.push(match usage {
            Some(u) if prefs.show_reset_times => format!(
                "Week: {}% (resets {})",
                u.seven_day.percent(),
                format_weekly_reset_time(u.seven_day.resets_at.as_deref(), tz)
            ),
            Some(u) => format!("Week: {}%", u.seven_day.percent()),
            None => "Week: --%".to_string(),
        });
    }

    if prefs.show_git_branch
        && let Some(branch) = branch
    {
        segments.push(format!("⎇ {branch}"));
    }

    segments.join(" | ")
}

/// Current branch of the repository containing `dir`.
///
/// `None` outside a repository, on a detached HEAD, or when git is missing.
pub fn git_branch(dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["rev-parse", "--abbrev-ref", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if branch.is_empty() || branch == "HEAD" {
        return None;
    }
    Some(branch)
}

/// Full rendering pipeline: token, usage call, formatting.
pub fn render_statusline(
    input: &StatuslineInput,
    credentials: &dyn CredentialSource,
    client: &UsageClient,
    prefs: &DisplayPreferences,
) -> String {
    let usage = credentials
        .access_token()
        .map_err(|e| debug!(error = %e, "no OAuth token, rendering fallback"))
        .ok()
        .and_then(|token| {
            client
                .fetch(&token)
                .map_err(|e| debug!(error = %e, "usage fetch failed, rendering fallback"))
                .ok()
        });

    let branch = if prefs.show_git_branch {
        input
            .cwd
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .and_then(|dir| git_branch(&dir))
    } else {
        None
    };

    render_line(
        &input.model,
        usage.as_ref(),
        prefs,
        branch.as_deref(),
        &Local,
    )
}
