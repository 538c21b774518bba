//! `ccstatus config`: choose which statusline segments are shown.

use crate::prompt::{DialoguerPrompter, Prompter};
use crate::ui::Theme;
use anyhow::{Context, Result};
use ccstatus_common::{ClaudePaths, DisplayPreferences, PreferenceToggle};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOutcome {
    Saved,
    Unchanged,
    Cancelled,
}

pub fn run(show: bool, reset: bool) -> Result<()> {
    let paths = ClaudePaths::locate().context("cannot locate Claude Code settings")?;
    let path = paths.preferences_file();
    let theme = Theme::default();

    if reset {
        DisplayPreferences::default()
            .save_to(&path)
            .context("failed to write display preferences")?;
        println!(
            "{}",
            theme.success("Preferences reset", &path.display().to_string())
        );
        println!();
        return Ok(());
    }

    let current = DisplayPreferences::load_or_default(&paths);
    if show {
        print!("{}", render_preferences(&current, &theme));
        return Ok(());
    }

    let mut prompter = DialoguerPrompter::new();
    if !prompter.is_interactive() {
        anyhow::bail!("config needs an interactive terminal; use --show or --reset");
    }
    let outcome = configure_with(&path, current, &mut prompter, &theme)?;
    info!(?outcome, "config finished");
    Ok(())
}

/// One `label  ● ON` line per toggle.
pub fn render_preferences(prefs: &DisplayPreferences, theme: &Theme) -> String {
    let mut out = format!("{}\n\n", theme.title("Statusline Configuration"));
    for toggle in PreferenceToggle::ALL {
        let state = if prefs.get(toggle) {
            theme.ok.apply_to("● ON ").to_string()
        } else {
            theme.dim.apply_to("○ OFF").to_string()
        };
        out.push_str(&format!("  {:<20} {state}\n", toggle.label()));
    }
    out.push('\n');
    out
}

/// Apply a multi-select result: checked indices are on, the rest off.
pub fn apply_selection(prefs: &mut DisplayPreferences, checked: &[usize]) {
    for (index, toggle) in PreferenceToggle::ALL.into_iter().enumerate() {
        prefs.set(toggle, checked.contains(&index));
    }
}

pub fn configure_with(
    path: &Path,
    current: DisplayPreferences,
    prompter: &mut dyn Prompter,
    theme: &Theme,
) -> Result<ConfigOutcome> {
    let items: Vec<String> = PreferenceToggle::ALL
        .iter()
        .map(|t| format!("{:<16} {}", t.label(), theme.dim.apply_to(t.description())))
        .collect();
    let checked: Vec<bool> = PreferenceToggle::ALL
        .iter()
        .map(|t| current.get(*t))
        .collect();

    let Some(selection) =
        prompter.select_many("Statusline segments (space to toggle)", &items, &checked)
    else {
        println!("{}", theme.warning("Cancelled", "No changes were made."));
        println!();
        return Ok(ConfigOutcome::Cancelled);
    };

    let mut updated = current;
    apply_selection(&mut updated, &selection);
    if updated == current {
        println!("{}", theme.hint("No changes."));
        println!();
        return Ok(ConfigOutcome::Unchanged);
    }

    if !prompter.confirm("Save changes?", true) {
        println!("{}", theme.warning("Cancelled", "No changes were made."));
        println!();
        return Ok(ConfigOutcome::Cancelled);
    }

    updated
        .save_to(path)
        .context("failed to write display preferences")?;
    println!(
        "{}",
        theme.success(
            "Configuration saved!",
            "Your statusline preferences have been updated."
        )
    );
    println!();
    Ok(ConfigOutcome::Saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::{Answer, ScriptedPrompter};
    use tempfile::TempDir;

    #[test]
    fn test_apply_selection() {
        let mut prefs = DisplayPreferences::default();
        apply_selection(&mut prefs, &[1, 3]);
        assert!(!prefs.show_session_usage);
        assert!(prefs.show_weekly_usage);
        assert!(!prefs.show_reset_times);
        assert!(prefs.show_git_branch);
    }

    #[test]
    fn test_configure_saves_changes() {
        let temp = TempDir::new().unwrap();
        let paths = ClaudePaths::from_home(temp.path());
        let mut prompter = ScriptedPrompter::new([
            Answer::SelectMany(Some(vec![0, 1, 2, 3])),
            Answer::Confirm(true),
        ]);

        let outcome = configure_with(
            &paths.preferences_file(),
            DisplayPreferences::default(),
            &mut prompter,
            &Theme::default(),
        )
        .unwrap();

        assert_eq!(outcome, ConfigOutcome::Saved);
        assert!(DisplayPreferences::load_from(&paths.preferences_file())
            .unwrap()
            .show_git_branch);
    }

    #[test]
    fn test_configure_without_changes_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let path = ClaudePaths::from_home(temp.path()).preferences_file();
        let mut prompter = ScriptedPrompter::new([Answer::SelectMany(Some(vec![0, 1, 2]))]);

        let outcome = configure_with(
            &path,
            DisplayPreferences::default(),
            &mut prompter,
            &Theme::default(),
        )
        .unwrap();

        assert_eq!(outcome, ConfigOutcome::Unchanged);
        assert!(!path.exists());
    }

    #[test]
    fn test_configure_cancel_paths() {
        let temp = TempDir::new().unwrap();
        let path = ClaudePaths::from_home(temp.path()).preferences_file();

        let mut escape = ScriptedPrompter::new([Answer::SelectMany(None)]);
        assert_eq!(
            configure_with(&path, DisplayPreferences::default(), &mut escape, &Theme::default())
                .unwrap(),
            ConfigOutcome::Cancelled
        );

        let mut decline =
            ScriptedPrompter::new([Answer::SelectMany(Some(vec![])), Answer::Confirm(false)]);
        assert_eq!(
            configure_with(&path, DisplayPreferences::default(), &mut decline, &Theme::default())
                .unwrap(),
            ConfigOutcome::Cancelled
        );
        assert!(!path.exists());
    }

    #[test]
    fn test_render_preferences_lists_every_toggle() {
        console::set_colors_enabled(false);
        let rendered = render_preferences(&DisplayPreferences::default(), &Theme::default());
        assert!(rendered.contains("Session Usage"), "{rendered}");
        assert!(rendered.contains("Git Branch           ○ OFF"), "{rendered}");
        assert!(rendered.contains("Reset Times          ● ON"), "{rendered}");
    }
}
