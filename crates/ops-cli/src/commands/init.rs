//! Init command: reset, clean migrations, generate, migrate
//!
//! Steps run strictly in order and the first failure stops the sequence.
//! `--from-step N` resumes at step N, skipping the ones before it.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::commands::common::ExitCode;
use crate::commands::drizzle::{self, KitCommand};
use crate::commands::reset::{self, ResetMode};
use crate::context::RuntimeContext;

/// One step of the init sequence, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum InitStep {
    Reset = 1,
    RemoveMigrations = 2,
    Generate = 3,
    Migrate = 4,
}

impl InitStep {
    pub(crate) const ALL: [InitStep; 4] = [
        InitStep::Reset,
        InitStep::RemoveMigrations,
        InitStep::Generate,
        InitStep::Migrate,
    ];

    pub(crate) fn number(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    /// Short name used in failure messages
    pub(crate) fn name(self) -> &'static str {
        match self {
            InitStep::Reset => "reset",
            InitStep::RemoveMigrations => "remove migrations",
            InitStep::Generate => "generate",
            InitStep::Migrate => "migrate",
        }
    }

    fn title(self) -> &'static str {
        match self {
            InitStep::Reset => "Resetting DB schema...",
            InitStep::RemoveMigrations => "Removing old migrations folder...",
            InitStep::Generate => "Generating new migrations...",
            InitStep::Migrate => "Applying migrations...",
        }
    }
}

/// A failed init step
#[derive(Error, Debug)]
#[error("step {} ({}) failed: {cause:#}", .step.number(), .step.name())]
pub(crate) struct InitError {
    pub(crate) step: InitStep,
    pub(crate) cause: anyhow::Error,
}

/// Remove the migrations directory. Returns false when it did not exist.
pub(crate) fn remove_migrations_dir(path: &Path) -> io::Result<bool> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

async fn run_step(ctx: &RuntimeContext, step: InitStep) -> Result<()> {
    match step {
        InitStep::Reset => {
            reset::run(ctx, ResetMode::Confirmed, reset::assume_yes).await?;
        }
        InitStep::RemoveMigrations => {
            let dir = ctx.project.migrations_dir();
            if remove_migrations_dir(&dir)? {
                println!("✅ Removed old migrations folder: {}", dir.display());
            } else {
                println!("ℹ️ No existing migrations folder to remove.");
            }
        }
        InitStep::Generate => drizzle::run_kit(ctx, KitCommand::Generate).await?,
        InitStep::Migrate => drizzle::run_kit(ctx, KitCommand::Migrate).await?,
    }
    Ok(())
}

/// Run the sequence starting at `from`
pub(crate) async fn run(ctx: &RuntimeContext, from: InitStep) -> Result<(), InitError> {
    for step in InitStep::ALL.into_iter().filter(|s| *s >= from) {
        println!("\n🔹 Step {}: {}", step.number(), step.title());
        log::debug!("init step {} ({})", step.number(), step.name());
        run_step(ctx, step)
            .await
            .map_err(|cause| InitError { step, cause })?;
    }
    Ok(())
}

/// Execute the init command
pub(crate) async fn execute(ctx: &RuntimeContext, from_step: Option<u8>) -> Result<()> {
    let from = match from_step {
        Some(n) => InitStep::from_number(n)
            .ok_or_else(|| anyhow::anyhow!("--from-step must be between 1 and 4, got {}", n))?,
        None => InitStep::Reset,
    };
    if from != InitStep::Reset {
        println!("⏭  Resuming init at step {}", from.number());
    }

    match run(ctx, from).await {
        Ok(()) => {
            println!(
                "\n✅ SUCCESS: Database schema \"{}\" is now fully populated and a new migration folder is created at:\n{}\n",
                ctx.env.database_schema,
                ctx.project.migrations_dir().display()
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("\n❌ ERROR: Drizzle init procedure failed.");
            eprintln!("{}", err);
            eprintln!(
                "💡 Fix the problem, then resume with: dbops drizzle:init --from-step {}",
                err.step.number()
            );
            Err(ExitCode(1).into())
        }
    }
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
