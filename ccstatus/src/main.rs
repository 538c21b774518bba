//! ccstatus - Claude Code statusline with live usage limits
//!
//! Without a subcommand, reads the host's JSON payload on stdin and prints
//! one statusline. Subcommands manage the registration in
//! `~/.claude/settings.json`.

#![forbid(unsafe_code)]

mod commands;
mod prompt;
mod ui;

use anyhow::Result;
use ccstatus_common::RuntimeConfig;
use ccstatus_common::logging::init_logging;
use clap::{Parser, Subcommand};
use tracing::warn;

#[derive(Parser)]
#[command(name = "ccstatus")]
#[command(author, version, about = "Claude Code statusline showing session and weekly usage")]
struct Cli {
    /// Enable verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure ccstatus as the Claude Code statusline
    Install {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Replace the whole statusLine entry instead of only its command
        #[arg(long)]
        replace_entry: bool,
    },

    /// Remove ccstatus from the Claude Code statusline configuration
    Uninstall {
        /// Skip prompts; removes the entry unless --restore is given
        #[arg(short, long)]
        yes: bool,

        /// Restore the most recent settings backup
        #[arg(long)]
        restore: bool,
    },

    /// Check ccstatus configuration and dependencies
    Doctor,

    /// Configure statusline display options
    Config {
        /// Print the current preferences and exit
        #[arg(long, conflicts_with = "reset")]
        show: bool,

        /// Restore default preferences
        #[arg(long)]
        reset: bool,
    },

    /// Print the version number
    Version,
}

fn dispatch(cli: Cli, runtime: &RuntimeConfig) -> Result<()> {
    match cli.command {
        None => commands::statusline::run(runtime),
        Some(Commands::Install { yes, replace_entry }) => commands::install::run(yes, replace_entry),
        Some(Commands::Uninstall { yes, restore }) => commands::uninstall::run(yes, restore),
        Some(Commands::Doctor) => commands::doctor::run(runtime),
        Some(Commands::Config { show, reset }) => commands::config::run(show, reset),
        Some(Commands::Version) => {
            commands::version::run();
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let runtime = RuntimeConfig::from_env();

    init_logging(runtime.log_filter.as_deref(), cli.verbose);
    for warning in &runtime.warnings {
        warn!("{warning}");
    }

    if let Err(err) = dispatch(cli, &runtime) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
