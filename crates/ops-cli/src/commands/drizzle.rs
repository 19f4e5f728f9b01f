//! Pass-through migration tool commands

use anyhow::Result;
use std::time::Instant;

use crate::commands::common::{run_tool, ExitCode};
use crate::context::RuntimeContext;
use crate::runner::{Invocation, ToolError};

/// Migration tool subcommands exposed as `drizzle:<sub>` tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KitCommand {
    Generate,
    Migrate,
    Pull,
    Check,
    Up,
    Studio,
}

impl KitCommand {
    /// Subcommand passed to the tool
    pub(crate) fn subcommand(self) -> &'static str {
        match self {
            KitCommand::Generate => "generate",
            KitCommand::Migrate => "migrate",
            KitCommand::Pull => "pull",
            KitCommand::Check => "check",
            KitCommand::Up => "up",
            KitCommand::Studio => "studio",
        }
    }

    /// User-facing command token
    pub(crate) fn token(self) -> &'static str {
        match self {
            KitCommand::Generate => "drizzle:generate",
            KitCommand::Migrate => "drizzle:migrate",
            KitCommand::Pull => "drizzle:pull",
            KitCommand::Check => "drizzle:check",
            KitCommand::Up => "drizzle:up",
            KitCommand::Studio => "drizzle:studio",
        }
    }

    fn status_line(self) -> &'static str {
        match self {
            KitCommand::Generate => "Generating Drizzle migrations...",
            KitCommand::Migrate => "Running Drizzle migrations...",
            KitCommand::Pull => "Pulling DB schema into Drizzle (introspecting)...",
            KitCommand::Check => "Checking Drizzle schema & migrations...",
            KitCommand::Up => "Creating & running new Drizzle migrations...",
            KitCommand::Studio => "Launching Drizzle Studio...",
        }
    }
}

/// Build `<program> <args..> <sub> --config=<abs>` run from the project root
///
/// The child sees the validated environment plus the resolved migrations
/// directory, so the tool's config can point `out` at the folder init cleans.
pub(crate) fn invocation(ctx: &RuntimeContext, cmd: KitCommand) -> Invocation {
    Invocation::tool(&ctx.project.config.drizzle, cmd.subcommand())
        .arg(format!(
            "--config={}",
            ctx.project.drizzle_config_path().display()
        ))
        .envs(ctx.env.child_env())
        .envs(ctx.project.drizzle_env())
        .current_dir(&ctx.project.root)
}

/// Run one tool subcommand without any banner output
pub(crate) async fn run_kit(ctx: &RuntimeContext, cmd: KitCommand) -> Result<(), ToolError> {
    run_tool(ctx, &invocation(ctx, cmd)).await
}

/// Execute a pass-through command, propagating the tool's exit code
pub(crate) async fn execute(ctx: &RuntimeContext, cmd: KitCommand) -> Result<()> {
    println!("\n⚡ {}\n", cmd.status_line());
    if cmd == KitCommand::Migrate {
        println!(
            "📂 Using migrations folder: {}",
            ctx.project.migrations_dir().display()
        );
    }

    let start = Instant::now();
    match run_kit(ctx, cmd).await {
        Ok(()) => {
            println!(
                "\n✅ Completed: {} ({}ms)\n",
                cmd.token(),
                start.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("\n❌ Drizzle command '{}' failed.\n{}", cmd.token(), err);
            Err(ExitCode(err.exit_code()).into())
        }
    }
}

const PUSH_DISABLED: &str = "
❌ drizzle:push is DISABLED in this CLI.

⚠️ Reason:
  - drizzle-kit push can DROP existing tables
  - This will result in PERMANENT DATA LOSS

💡 Recommended Actions:
  1. If starting fresh → use `dbops drizzle:init` instead.
  2. If preserving data → use migrations:
       dbops drizzle:generate
       dbops drizzle:migrate
";

/// `drizzle:push` is disabled; explain why and exit cleanly
pub(crate) fn push() {
    eprintln!("{}", PUSH_DISABLED);
}

#[cfg(test)]
#[path = "drizzle_test.rs"]
mod tests;
