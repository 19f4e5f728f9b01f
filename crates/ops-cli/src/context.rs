//! Runtime context for CLI commands

use anyhow::{Context, Result};
use ops_core::{EnvConfig, EnvFiles, EnvRequirement, Project};
use ops_db::{Database, PostgresBackend};
use std::sync::Arc;

use crate::cli::GlobalArgs;
use crate::runner::{ProcessRunner, ToolRunner};

/// Runtime context containing the loaded project, validated environment,
/// database handle and tool runner
pub(crate) struct RuntimeContext {
    /// The loaded project
    pub(crate) project: Project,

    /// Validated environment, forwarded to every child process
    pub(crate) env: EnvConfig,

    /// Database connection (lazy, opened on first statement)
    pub(crate) db: Arc<dyn Database>,

    /// External tool runner
    pub(crate) runner: Arc<dyn ToolRunner>,

    /// Verbose output enabled
    pub(crate) verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub(crate) fn new(args: &GlobalArgs, requirement: EnvRequirement) -> Result<Self> {
        let project = Project::load(&args.project_dir, args.config.as_deref())
            .context("Failed to load project configuration")?;

        let files = match &args.env_file {
            Some(path) => EnvFiles::load_explicit(path),
            None => EnvFiles::load_default(&project.root),
        }
        .context("Failed to read env files")?;
        for path in files.paths() {
            log::debug!("Using env file {}", path.display());
        }

        let env = EnvConfig::load(requirement, &files).context("Invalid environment")?;
        log::debug!("Resolved environment: {:?}", env);

        let db: Arc<dyn Database> = Arc::new(
            PostgresBackend::connect_lazy(&env.database_url)
                .context("Failed to configure database connection")?,
        );

        Ok(Self {
            project,
            env,
            db,
            runner: Arc::new(ProcessRunner),
            verbose: args.verbose,
        })
    }

    /// Print verbose output if enabled
    pub(crate) fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}
