//! Reset command: drop every known table from the configured schema
//!
//! The table set is read from the manifests before the operator is asked,
//! so a broken manifest fails without a prompt. Nothing touches the database
//! until the answer is in. Drops run one at a time, outside a transaction,
//! and the first failure aborts the rest.

use anyhow::{Context, Result};
use ops_core::sql_utils::quote_schema_table;
use ops_core::TableSet;
use ops_db::{Database, DbError};
use std::future::Future;
use std::io::{self, BufRead, Write};

use crate::commands::common::ExitCode;
use crate::context::RuntimeContext;

/// Whether the operator must confirm before tables are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResetMode {
    /// Ask on stdin
    Interactive,
    /// Already confirmed (`--yes`, or called from init)
    Confirmed,
}

/// Result of a reset that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ResetOutcome {
    Cancelled,
    Dropped { tables: usize },
}

/// Accepts `yes` or `y` in any case, surrounding whitespace ignored
pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "yes" | "y")
}

/// Write `question (yes/no): ` and read one line. EOF declines.
pub(crate) fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(output, "{} (yes/no): ", question)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    Ok(is_affirmative(&line))
}

/// Drop each table in order, stopping at the first failure.
pub(crate) async fn drop_tables(
    db: &dyn Database,
    schema: &str,
    tables: &TableSet,
) -> Result<usize, DbError> {
    let mut dropped = 0;
    for table in tables.iter() {
        println!("→ Dropping {}", quote_schema_table(schema, table));
        db.drop_table_cascade(schema, table).await?;
        dropped += 1;
    }
    Ok(dropped)
}

/// Run the reset, asking `confirm` first in interactive mode
pub(crate) async fn run<F, Fut>(
    ctx: &RuntimeContext,
    mode: ResetMode,
    confirm: F,
) -> Result<ResetOutcome>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = io::Result<bool>>,
{
    let schema = ctx.env.database_schema.as_str();
    let tables = TableSet::load(&ctx.project.schema_dir()).context("Failed to load table manifests")?;
    ctx.verbose(&format!(
        "{} table(s) from {} manifest(s)",
        tables.len(),
        tables.manifests().len()
    ));

    if mode == ResetMode::Interactive {
        let question = format!(
            "⚠️  This will DROP ALL {} table(s) in schema \"{}\". Are you sure?",
            tables.len(),
            schema
        );
        if !confirm(question).await.context("Failed to read confirmation")? {
            println!("❌ Operation cancelled.");
            return Ok(ResetOutcome::Cancelled);
        }
    }

    println!("🧨 Dropping all tables from schema: {}", schema);
    if tables.is_empty() {
        println!("ℹ️ No tables declared under {}", ctx.project.schema_dir().display());
        return Ok(ResetOutcome::Dropped { tables: 0 });
    }

    log::info!("Dropping {} table(s) via {}", tables.len(), ctx.db.db_type());
    let dropped = drop_tables(ctx.db.as_ref(), schema, &tables)
        .await
        .context("Failed to drop tables")?;
    println!("✅ All tables dropped.");
    Ok(ResetOutcome::Dropped { tables: dropped })
}

/// Ask on the terminal from a blocking thread
pub(crate) async fn confirm_on_stdin(question: String) -> io::Result<bool> {
    tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        prompt_yes_no(&mut stdin.lock(), &mut io::stdout(), &question)
    })
    .await
    .map_err(io::Error::other)?
}

/// Already confirmed by the caller
pub(crate) async fn assume_yes(_question: String) -> io::Result<bool> {
    Ok(true)
}

/// Execute the reset command against stdin/stdout
pub(crate) async fn execute(ctx: &RuntimeContext, mode: ResetMode) -> Result<()> {
    match run(ctx, mode, confirm_on_stdin).await {
        Ok(_) => Ok(()),
        Err(err) => {
            eprintln!("❌ Failed to drop tables: {:#}", err);
            Err(ExitCode(1).into())
        }
    }
}

#[cfg(test)]
#[path = "reset_test.rs"]
mod tests;
