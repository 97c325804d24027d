use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tribble_backlog::EntryStatus;
use tribble_store::WriteMode;

#[derive(Parser)]
#[command(
    name = "tribble",
    about = "tribble — a backlog kept in a single framed file",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Project root holding `.tribble/` and the backlog file
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// fsync after every write
    #[arg(long, global = true)]
    pub sync: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create `.tribble/` and a default config
    Init,
    /// Add an entry to the backlog
    Add(AddArgs),
    /// List backlog entries
    List(ListArgs),
    /// Print the active configuration
    Config,
    /// Verify every frame in the backlog file
    Check,
}

#[derive(Args)]
pub struct AddArgs {
    pub title: String,
    #[arg(short, long, default_value = "")]
    pub description: String,
    #[arg(short, long, default_value = "todo")]
    pub status: EntryStatus,
    /// `append` to log the entry, `overwrite` to reset the backlog to it
    #[arg(long, default_value = "append")]
    pub mode: WriteMode,
}

#[derive(Args)]
pub struct ListArgs {
    /// Show every recorded version instead of the latest per entry
    #[arg(short, long)]
    pub all: bool,
}
