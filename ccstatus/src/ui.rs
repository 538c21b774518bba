//! Terminal presentation helpers.
//!
//! A [`Theme`] is built per command and passed down. Nothing here is global.
//! Status lines go to stdout; spinners draw on stderr and stay hidden when
//! stderr is not a terminal.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const DIVIDER_WIDTH: usize = 44;

/// Styles for the interactive commands.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Style,
    pub ok: Style,
    pub warn: Style,
    pub error: Style,
    pub dim: Style,
    pub bold: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Style::new().cyan().bold(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            error: Style::new().red(),
            dim: Style::new().dim(),
            bold: Style::new().bold(),
        }
    }
}

/// Glyph shown in front of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Ok,
    Warning,
    Error,
    Info,
}

impl StatusIndicator {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Ok => "✓",
            Self::Warning => "!",
            Self::Error => "✗",
            Self::Info => "•",
        }
    }
}

impl Theme {
    /// Title block: `◆ <text>` followed by a divider.
    pub fn title(&self, text: &str) -> String {
        format!(
            "\n  {} {}\n{}",
            self.primary.apply_to("◆"),
            self.primary.apply_to(text),
            self.divider()
        )
    }

    pub fn heading(&self, text: &str) -> String {
        format!("  {}\n{}", self.bold.apply_to(text), self.divider())
    }

    pub fn divider(&self) -> String {
        format!("  {}", self.dim.apply_to("─".repeat(DIVIDER_WIDTH)))
    }

    /// `  ✓ Label  detail`
    pub fn status(&self, indicator: StatusIndicator, label: &str, detail: &str) -> String {
        let style = match indicator {
            StatusIndicator::Ok => &self.ok,
            StatusIndicator::Warning => &self.warn,
            StatusIndicator::Error => &self.error,
            StatusIndicator::Info => &self.dim,
        };
        let mut line = format!(
            "  {} {}",
            style.apply_to(indicator.glyph()),
            self.bold.apply_to(label)
        );
        if !detail.is_empty() {
            line.push_str("  ");
            line.push_str(&self.dim.apply_to(detail).to_string());
        }
        line
    }

    pub fn success(&self, headline: &str, detail: &str) -> String {
        self.message(&self.ok, StatusIndicator::Ok, headline, detail)
    }

    pub fn warning(&self, headline: &str, detail: &str) -> String {
        self.message(&self.warn, StatusIndicator::Warning, headline, detail)
    }

    pub fn failure(&self, headline: &str, detail: &str) -> String {
        self.message(&self.error, StatusIndicator::Error, headline, detail)
    }

    fn message(
        &self,
        style: &Style,
        indicator: StatusIndicator,
        headline: &str,
        detail: &str,
    ) -> String {
        let mut out = format!(
            "\n  {} {}",
            style.apply_to(indicator.glyph()),
            style.apply_to(headline).bold()
        );
        if !detail.is_empty() {
            out.push_str(&format!("\n    {}", self.dim.apply_to(detail)));
        }
        out
    }

    pub fn hint(&self, text: &str) -> String {
        format!("  {}", self.dim.apply_to(text))
    }

    pub fn bullet(&self, text: &str) -> String {
        format!("  {} {}", self.primary.apply_to("›"), text)
    }
}

/// A spinner for one step. Cleared on drop.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            bar.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "]));
        }
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn stop(self) {}
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
