//! Command token routing
//!
//! Exactly one token selects one operation. Unknown tokens are rejected
//! before any configuration is read or any tool is started.

use anyhow::Result;
use ops_core::EnvRequirement;
use std::fmt;
use std::str::FromStr;

use crate::cli::{CommandOptions, GlobalArgs};
use crate::commands::common::ExitCode;
use crate::commands::drizzle::KitCommand;
use crate::commands::reset::ResetMode;
use crate::commands::{auth, drizzle, init, reset};
use crate::context::RuntimeContext;

/// Command listing shown after `--help` and on unknown tokens
pub(crate) const COMMAND_HELP: &str = "\
Available commands:
  drizzle:init      (⚡ Full reset + generate + migrate)
  drizzle:generate  | drizzle:push | drizzle:pull
  drizzle:check     | drizzle:up   | drizzle:studio
  drizzle:migrate   | drizzle:reset (⚠️ Drops all tables)

  auth:generate     | auth:migrate";

/// A recognised command token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CommandToken {
    Kit(KitCommand),
    Push,
    Reset,
    Init,
    AuthGenerate,
    AuthMigrate,
}

impl CommandToken {
    pub(crate) const ALL: [CommandToken; 11] = [
        CommandToken::Init,
        CommandToken::Kit(KitCommand::Generate),
        CommandToken::Push,
        CommandToken::Kit(KitCommand::Pull),
        CommandToken::Kit(KitCommand::Check),
        CommandToken::Kit(KitCommand::Up),
        CommandToken::Kit(KitCommand::Studio),
        CommandToken::Kit(KitCommand::Migrate),
        CommandToken::Reset,
        CommandToken::AuthGenerate,
        CommandToken::AuthMigrate,
    ];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            CommandToken::Kit(cmd) => cmd.token(),
            CommandToken::Push => "drizzle:push",
            CommandToken::Reset => "drizzle:reset",
            CommandToken::Init => "drizzle:init",
            CommandToken::AuthGenerate => "auth:generate",
            CommandToken::AuthMigrate => "auth:migrate",
        }
    }

    /// Environment needed before the command may run; `None` needs nothing
    pub(crate) fn env_requirement(self) -> Option<EnvRequirement> {
        match self {
            CommandToken::Push => None,
            CommandToken::AuthGenerate => Some(EnvRequirement::Auth),
            _ => Some(EnvRequirement::Database),
        }
    }
}

impl fmt::Display for CommandToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandToken {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

/// Resolve the single token, or explain what went wrong
pub(crate) fn resolve(tokens: &[String]) -> Result<CommandToken, String> {
    match tokens {
        [] => Err("❌ Unknown command: (none)".to_string()),
        [token] => token
            .parse()
            .map_err(|_| format!("❌ Unknown command: {}", token)),
        [_, extra, ..] => Err(format!("❌ Unexpected argument: {} (exactly one command)", extra)),
    }
}

/// Route the command line to its operation
pub(crate) async fn dispatch(
    tokens: &[String],
    global: &GlobalArgs,
    options: &CommandOptions,
) -> Result<()> {
    let token = match resolve(tokens) {
        Ok(token) => token,
        Err(message) => {
            eprintln!("\n{}\n\n{}\n", message, COMMAND_HELP);
            return Err(ExitCode(1).into());
        }
    };
    log::debug!("Dispatching {}", token);

    let Some(requirement) = token.env_requirement() else {
        drizzle::push();
        return Ok(());
    };

    let ctx = RuntimeContext::new(global, requirement)?;
    let result = execute(token, &ctx, options).await;
    ctx.db.close().await;
    result
}

/// Run a resolved token against a prepared context
pub(crate) async fn execute(
    token: CommandToken,
    ctx: &RuntimeContext,
    options: &CommandOptions,
) -> Result<()> {
    match token {
        CommandToken::Kit(cmd) => drizzle::execute(ctx, cmd).await,
        CommandToken::Push => {
            drizzle::push();
            Ok(())
        }
        CommandToken::Reset => {
            let mode = if options.yes {
                ResetMode::Confirmed
            } else {
                ResetMode::Interactive
            };
            reset::execute(ctx, mode).await
        }
        CommandToken::Init => init::execute(ctx, options.from_step).await,
        CommandToken::AuthGenerate => auth::generate(ctx).await,
        CommandToken::AuthMigrate => auth::migrate(ctx).await,
    }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
