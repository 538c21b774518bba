//! Default command: print the statusline for Claude Code.
//!
//! Never fails because of missing credentials, network trouble, or bad
//! preferences; those all degrade to the fallback line.

use anyhow::{Context, Result};
use ccstatus_common::render::{StatuslineInput, parse_input, render_statusline};
use ccstatus_common::{
    ChainedCredentials, ClaudePaths, DisplayPreferences, RuntimeConfig, UsageClient,
};
use std::io::{self, IsTerminal, Read, Write};
use tracing::debug;

/// Host payload from stdin; nothing is read from a terminal.
fn read_input() -> StatuslineInput {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return StatuslineInput::default();
    }
    let mut raw = String::new();
    if let Err(e) = stdin.read_to_string(&mut raw) {
        debug!(error = %e, "cannot read statusline input");
        return StatuslineInput::default();
    }
    parse_input(&raw)
}

pub fn run(runtime: &RuntimeConfig) -> Result<()> {
    let input = read_input();

    let paths = ClaudePaths::locate()
        .map_err(|e| debug!(error = %e, "no home directory"))
        .ok();
    let prefs = paths
        .as_ref()
        .map(DisplayPreferences::load_or_default)
        .unwrap_or_default();
    let credentials = ChainedCredentials::standard(runtime.oauth_token.clone(), paths.as_ref());
    let client = UsageClient::new(&runtime.usage_api_url, runtime.api_timeout);

    let line = render_statusline(&input, &credentials, &client, &prefs);

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(line.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write statusline")?;
    Ok(())
}
