//! Auth schema commands

use anyhow::{Context, Result};
use std::fs;

use crate::commands::common::{run_tool, ExitCode};
use crate::commands::drizzle::{self, KitCommand};
use crate::context::RuntimeContext;
use crate::runner::Invocation;

const MIGRATE_NOTE: &str = "NOTE: [Better Auth]: The migrate command only works with the built-in \
Kysely adapter. For Drizzle, run the auth generator to create the schema, then use Drizzle's \
migrate to apply it.";

/// Build `<program> <args..> generate --config=<abs> --output=<abs>`
pub(crate) fn generate_invocation(ctx: &RuntimeContext) -> Invocation {
    Invocation::tool(&ctx.project.config.better_auth, "generate")
        .arg(format!("--config={}", ctx.project.auth_config_path().display()))
        .arg(format!("--output={}", ctx.project.auth_schema_output().display()))
        .envs(ctx.env.child_env())
        .current_dir(&ctx.project.root)
}

/// Execute `auth:generate`
pub(crate) async fn generate(ctx: &RuntimeContext) -> Result<()> {
    println!("\n⚡ Generating Better Auth schema...");
    let output_dir = ctx.project.auth_output_dir();
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    if let Err(err) = run_tool(ctx, &generate_invocation(ctx)).await {
        eprintln!("❌ Auth schema generation failed.\n{}", err);
        return Err(ExitCode(1).into());
    }
    println!(
        "✅ Schema generated: {}\n",
        ctx.project.auth_schema_output().display()
    );
    Ok(())
}

/// Execute `auth:migrate`, which delegates to the migration tool
pub(crate) async fn migrate(ctx: &RuntimeContext) -> Result<()> {
    println!("\n⚡ Migrating Auth schema...");
    println!("\n{}", MIGRATE_NOTE);
    println!("\n...Running Drizzle Migrate now");
    if drizzle::execute(ctx, KitCommand::Migrate).await.is_err() {
        return Err(ExitCode(1).into());
    }
    println!("✅ Migration complete\n");
    Ok(())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
