//! Shared utilities for CLI commands

use std::fmt;
use std::time::Instant;

use crate::context::RuntimeContext;
use crate::runner::{Invocation, ToolError};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that the database pool is closed and child handles are dropped.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty: the failure was already reported to the user. If anyhow's
        // Display chain reaches this, "exit code N" must not leak to stderr.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Run an external tool through the context's runner, echoing the command.
pub(crate) async fn run_tool(ctx: &RuntimeContext, invocation: &Invocation) -> Result<(), ToolError> {
    println!("\n⚡ Executing: {}\n", invocation.display_command());
    let start = Instant::now();
    let result = ctx.runner.run(invocation).await;
    ctx.verbose(&format!(
        "{} finished in {}ms",
        invocation.program,
        start.elapsed().as_millis()
    ));
    result
}
