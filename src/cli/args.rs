use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::translation::Catalog;

#[derive(Parser, Debug)]
#[command(name = "skylog")]
#[command(about = "Watch the Sky client log and print localized event messages")]
#[command(version)]
pub struct Args {
    /// Log file to watch (prompts if not provided and not configured)
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub table: TableArgs,

    /// Poll interval in milliseconds
    #[arg(short = 'i', long = "interval-ms", value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Disable filesystem notifications and rely on interval polling only
    #[arg(long)]
    pub no_watch: bool,

    /// Suppress status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase diagnostic logging (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options that select the pattern table.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Built-in vocabulary
    #[arg(short = 'c', long, value_enum)]
    pub catalog: Option<Catalog>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the active patterns in priority order
    Patterns {
        #[command(flatten)]
        table: TableArgs,
    },
    /// Translate lines given as arguments (or read from stdin)
    Translate {
        /// Lines to translate
        lines: Vec<String>,

        #[command(flatten)]
        table: TableArgs,
    },
    /// Configure default settings
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
