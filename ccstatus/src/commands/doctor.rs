//! `ccstatus doctor`: diagnose the installation.
//!
//! Every check is independent and reports rather than fails; the command
//! itself exits 0 unless the home directory cannot be resolved.

use super::helpers::{file_name, humanize_duration, mask_token};
use crate::ui::{Spinner, StatusIndicator, Theme};
use anyhow::{Context, Result};
use ccstatus_common::credentials::CredentialSource;
use ccstatus_common::statusline_entry::{EntryState, TOOL_COMMAND, entry_state};
use ccstatus_common::usage::DOCTOR_TIMEOUT;
use ccstatus_common::{
    BackupManager, ChainedCredentials, ClaudePaths, DisplayPreferences, RuntimeConfig,
    SettingsStore, UsageClient, UsageError,
};
use std::time::SystemTime;

/// Result of one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub ok: bool,
    pub message: String,
}

impl CheckResult {
    fn pass(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            ok: true,
            message: message.into(),
        }
    }

    fn fail(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            ok: false,
            message: message.into(),
        }
    }
}

pub fn run(runtime: &RuntimeConfig) -> Result<()> {
    let paths = ClaudePaths::locate().context("cannot locate Claude Code settings")?;
    let credentials = ChainedCredentials::standard(runtime.oauth_token.clone(), Some(&paths));
    let client = UsageClient::new(&runtime.usage_api_url, DOCTOR_TIMEOUT);
    let theme = Theme::default();

    println!("{}", theme.title("ccstatus doctor"));

    let spinner = Spinner::start("Running diagnostics...");
    let checks = run_checks(&paths, &credentials, &client);
    spinner.stop();

    println!();
    println!("{}", theme.heading("Diagnostics"));
    println!();
    for check in &checks {
        let indicator = if check.ok {
            StatusIndicator::Ok
        } else {
            StatusIndicator::Error
        };
        println!("{}", theme.status(indicator, check.name, &check.message));
    }

    println!();
    println!("{}", theme.divider());
    let failed = checks.iter().filter(|c| !c.ok).count();
    if failed == 0 {
        println!(
            "{}",
            theme.success("All checks passed!", "ccstatus is ready to use.")
        );
    } else {
        println!(
            "{}",
            theme.failure(&format!("{failed} of {} checks failed", checks.len()), "")
        );
        println!();
        println!("  {}", theme.bold.apply_to("Quick fixes:"));
        println!();
        for fix in quick_fixes(&checks) {
            println!("{}", theme.bullet(fix));
        }
    }
    println!();
    Ok(())
}

pub fn run_checks(
    paths: &ClaudePaths,
    credentials: &dyn CredentialSource,
    client: &UsageClient,
) -> Vec<CheckResult> {
    let store = SettingsStore::new(paths.settings_file());
    let token = credentials.access_token();

    let mut checks = vec![
        check_config_exists(&store),
        check_statusline_configured(&store),
        check_binary_in_path(),
    ];
    checks.push(match &token {
        Ok(token) => CheckResult::pass("OAuth token", mask_token(token)),
        Err(e) => CheckResult::fail("OAuth token", format!("Cannot retrieve: {e}")),
    });
    checks.push(match &token {
        Ok(token) => check_api_endpoint(client, token),
        Err(_) => CheckResult::fail("Anthropic API", "Skipped (no token)"),
    });
    checks.push(check_backups(&BackupManager::new(paths.settings_file())));
    checks.push(check_preferences(paths));
    checks
}

fn quick_fixes(checks: &[CheckResult]) -> Vec<&'static str> {
    let failed = |name: &str| checks.iter().any(|c| c.name == name && !c.ok);
    let mut fixes = Vec::new();
    if failed("Claude Code configuration") || failed("Statusline configuration") {
        fixes.push("Run `ccstatus install` to configure the statusline");
    }
    if failed("Binary in PATH") {
        fixes.push("Ensure ccstatus is in your PATH");
    }
    if failed("OAuth token") || failed("Anthropic API") {
        fixes.push("Sign in to Claude Code to generate OAuth credentials");
    }
    if failed("Display preferences") {
        fixes.push("Run `ccstatus config --reset` to rewrite display preferences");
    }
    fixes
}

pub fn check_config_exists(store: &SettingsStore) -> CheckResult {
    const NAME: &str = "Claude Code configuration";
    match store.exists() {
        Ok(true) => CheckResult::pass(NAME, store.path().display().to_string()),
        Ok(false) => CheckResult::fail(NAME, format!("Not found at {}", store.path().display())),
        Err(e) => CheckResult::fail(NAME, format!("Error checking config: {e}")),
    }
}

pub fn check_statusline_configured(store: &SettingsStore) -> CheckResult {
    const NAME: &str = "Statusline configuration";
    let doc = match store.load() {
        Ok(doc) => doc,
        Err(e) => return CheckResult::fail(NAME, format!("Cannot read settings: {e}")),
    };
    match entry_state(&doc, TOOL_COMMAND) {
        EntryState::ConfiguredToSelf => CheckResult::pass(NAME, TOOL_COMMAND),
        EntryState::NotConfigured => CheckResult::fail(NAME, "Not configured"),
        EntryState::ConfiguredToOther(cmd) => {
            CheckResult::fail(NAME, format!("Different command: {cmd}"))
        }
    }
}

pub fn check_binary_in_path() -> CheckResult {
    const NAME: &str = "Binary in PATH";
    match which::which(TOOL_COMMAND) {
        Ok(path) => CheckResult::pass(NAME, path.display().to_string()),
        Err(_) => CheckResult::fail(NAME, "ccstatus not found in PATH"),
    }
}

pub fn check_api_endpoint(client: &UsageClient, token: &str) -> CheckResult {
    const NAME: &str = "Anthropic API";
    match client.fetch(token) {
        Ok(_) => CheckResult::pass(NAME, "Reachable"),
        Err(UsageError::Status(401)) => CheckResult::fail(NAME, "Token rejected (401)"),
        Err(UsageError::Status(code)) => CheckResult::fail(NAME, format!("HTTP {code}")),
        Err(UsageError::Timeout(_)) => CheckResult::fail(NAME, "Request timed out"),
        Err(UsageError::Network(e)) => CheckResult::fail(NAME, format!("Connection failed: {e}")),
        Err(e) => CheckResult::fail(NAME, e.to_string()),
    }
}

/// Informational: lists snapshots, never fails.
pub fn check_backups(backups: &BackupManager) -> CheckResult {
    const NAME: &str = "Backups";
    let list = backups.list_backups().unwrap_or_default();
    let Some(latest) = list.last() else {
        return CheckResult::pass(NAME, "none");
    };
    let age = SystemTime::now()
        .duration_since(latest.modified)
        .map(|d| format!(", {} ago", humanize_duration(d.as_secs())))
        .unwrap_or_default();
    CheckResult::pass(
        NAME,
        format!(
            "{} found, latest {}{age}",
            list.len(),
            file_name(&latest.path)
        ),
    )
}

pub fn check_preferences(paths: &ClaudePaths) -> CheckResult {
    const NAME: &str = "Display preferences";
    let path = paths.preferences_file();
    if !path.exists() {
        return CheckResult::pass(NAME, "defaults (no preferences file)");
    }
    match DisplayPreferences::load_from(&path) {
        Ok(_) => CheckResult::pass(NAME, path.display().to_string()),
        Err(e) => CheckResult::fail(NAME, e.to_string()),
    }
}
