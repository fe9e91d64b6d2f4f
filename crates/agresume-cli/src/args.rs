use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "agresume")]
#[command(about = "Resume a recent Codex, Claude Code or Gemini session for this project", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Maximum number of sessions to scan and show
    #[arg(long)]
    pub limit: Option<usize>,

    /// Include sessions from every project, not just the current one
    #[arg(long)]
    pub all: bool,

    /// Resume the most recent session without opening the picker
    #[arg(long, conflicts_with = "list")]
    pub last: bool,

    /// Print the resume command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the sessions and exit
    #[arg(long)]
    pub list: bool,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, global = true)]
    pub project_root: Option<String>,

    /// Config file (defaults to $AGRESUME_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show where each provider reads from and whether its tool is installed
    Doctor,
}
