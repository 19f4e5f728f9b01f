//! External tool execution
//!
//! Every external program (migration tool, auth generator) is started through
//! a [`ToolRunner`], which waits for the child to exit and reports a
//! structured result. Children inherit stdio so interactive tools such as the
//! schema browser keep working.

use async_trait::async_trait;
use ops_core::ToolCommand;
use std::path::PathBuf;
use std::process::Stdio;
use thiserror::Error;

/// A fully-resolved external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
    pub(crate) envs: Vec<(String, String)>,
    pub(crate) current_dir: Option<PathBuf>,
}

impl Invocation {
    pub(crate) fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            current_dir: None,
        }
    }

    /// Start from a configured tool and append its subcommand
    pub(crate) fn tool(tool: &impl ToolCommand, subcommand: &str) -> Self {
        let mut inv = Self::new(tool.program());
        inv.args.extend(tool.base_args().iter().cloned());
        inv.arg(subcommand)
    }

    pub(crate) fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub(crate) fn envs(mut self, vars: Vec<(String, String)>) -> Self {
        self.envs.extend(vars);
        self
    }

    pub(crate) fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Human-readable command line (environment values are never shown)
    pub(crate) fn display_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Failure of an external tool
#[derive(Error, Debug)]
pub(crate) enum ToolError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("'{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    #[error("'{command}' was terminated by a signal")]
    Terminated { command: String },
}

impl ToolError {
    /// Process exit code to propagate for this failure
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            ToolError::NonZeroExit { code, .. } => *code,
            ToolError::Spawn { .. } | ToolError::Terminated { .. } => 1,
        }
    }
}

/// Runs external tools to completion
#[async_trait]
pub(crate) trait ToolRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> Result<(), ToolError>;
}

/// Spawns real child processes with inherited stdio
pub(crate) struct ProcessRunner;

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<(), ToolError> {
        let mut command = tokio::process::Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .envs(invocation.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        let status = command.status().await.map_err(|source| ToolError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => Err(ToolError::NonZeroExit {
                command: invocation.display_command(),
                code,
            }),
            None => Err(ToolError::Terminated {
                command: invocation.display_command(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
