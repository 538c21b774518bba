//! User confirmation gates.

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect, Select};
use tracing::debug;

/// Source of answers for interactive commands.
pub trait Prompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool;

    /// Index of the chosen option, `None` when the user backs out.
    fn choose(&mut self, prompt: &str, options: &[&str], default: usize) -> Option<usize>;

    /// Indices of the checked items, `None` when the user backs out.
    fn select_many(&mut self, prompt: &str, items: &[String], checked: &[bool])
    -> Option<Vec<usize>>;
}

/// Prompts on the terminal. Declines everything when there is no terminal.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
    interactive: bool,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            interactive: Term::stderr().is_term(),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&mut self, prompt: &str, default: bool) -> bool {
        if !self.interactive {
            debug!(prompt, "no terminal, declining confirmation");
            return false;
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .unwrap_or(false)
    }

    fn choose(&mut self, prompt: &str, options: &[&str], default: usize) -> Option<usize> {
        if !self.interactive {
            debug!(prompt, "no terminal, skipping selection");
            return None;
        }
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(options)
            .default(default)
            .interact_opt()
            .ok()
            .flatten()
    }

    fn select_many(
        &mut self,
        prompt: &str,
        items: &[String],
        checked: &[bool],
    ) -> Option<Vec<usize>> {
        if !self.interactive {
            return None;
        }
        MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .defaults(checked)
            .interact_opt()
            .ok()
            .flatten()
    }
}

/// `--yes`: every confirmation is accepted.
///
/// Choices take the default; multi-selects keep the current state.
pub struct AssumeYes;

impl Prompter for AssumeYes {
    fn confirm(&mut self, _prompt: &str, _default: bool) -> bool {
        true
    }

    fn choose(&mut self, _prompt: &str, _options: &[&str], default: usize) -> Option<usize> {
        Some(default)
    }

    fn select_many(
        &mut self,
        _prompt: &str,
        _items: &[String],
        checked: &[bool],
    ) -> Option<Vec<usize>> {
        Some(
            checked
                .iter()
                .enumerate()
                .filter_map(|(i, on)| on.then_some(i))
                .collect(),
        )
    }
}
