//! CLI argument definitions using clap derive API

use clap::error::ErrorKind;
use clap::{Args, Parser};
use std::path::PathBuf;

/// dbops - schema migration operations for a Postgres-backed app
#[derive(Parser, Debug)]
#[command(name = "dbops")]
#[command(author, version, about, long_about = None)]
#[command(after_help = crate::dispatch::COMMAND_HELP)]
pub(crate) struct Cli {
    /// Global options
    #[command(flatten)]
    pub(crate) global: GlobalArgs,

    /// Options consulted by specific commands
    #[command(flatten)]
    pub(crate) options: CommandOptions,

    /// Command to run (exactly one, e.g. drizzle:migrate)
    #[arg(value_name = "COMMAND")]
    pub(crate) tokens: Vec<String>,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub(crate) struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub(crate) project_dir: PathBuf,

    /// Override config file path (default: <project-dir>/dbops.yml)
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// Read environment from this file instead of .env.local and .env
    #[arg(long, global = true)]
    pub(crate) env_file: Option<PathBuf>,
}

/// Options that only some commands read
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct CommandOptions {
    /// drizzle:reset: skip the confirmation prompt
    #[arg(short = 'y', long)]
    pub(crate) yes: bool,

    /// drizzle:init: resume the sequence at this step (1-4)
    #[arg(long, value_name = "STEP", value_parser = clap::value_parser!(u8).range(1..=4))]
    pub(crate) from_step: Option<u8>,
}

/// True for parse failures that should be reported like an unknown command.
///
/// Help and version requests keep clap's own output and exit status.
pub(crate) fn is_usage_error(err: &clap::Error) -> bool {
    !matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
