//! Recording doubles for the database and tool runner

use async_trait::async_trait;
use ops_core::{EnvConfig, EnvRequirement, Project};
use ops_db::{Database, DbError, DbResult};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::context::RuntimeContext;
use crate::runner::{Invocation, ToolError, ToolRunner};

/// Ordered record of every SQL statement and tool invocation
#[derive(Clone, Default)]
pub(crate) struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub(crate) fn push(&self, event: String) {
        self.0.lock().unwrap().push(event);
    }

    pub(crate) fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn sql(&self) -> Vec<String> {
        self.filtered("sql: ")
    }

    pub(crate) fn tools(&self) -> Vec<String> {
        self.filtered("tool: ")
    }

    fn filtered(&self, prefix: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| e.strip_prefix(prefix).map(String::from))
            .collect()
    }
}

/// Records invocations; optionally fails the one whose args contain `fail_on`
pub(crate) struct RecordingRunner {
    pub(crate) log: EventLog,
    pub(crate) fail_on: Option<(String, i32)>,
    pub(crate) invocations: Mutex<Vec<Invocation>>,
}

impl RecordingRunner {
    pub(crate) fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            fail_on: None,
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(log: &EventLog, subcommand: &str, code: i32) -> Self {
        Self {
            fail_on: Some((subcommand.to_string(), code)),
            ..Self::new(log)
        }
    }
}

#[async_trait]
impl ToolRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<(), ToolError> {
        self.log
            .push(format!("tool: {}", invocation.display_command()));
        self.invocations.lock().unwrap().push(invocation.clone());
        match &self.fail_on {
            Some((sub, code)) if invocation.args.iter().any(|a| a == sub) => {
                Err(ToolError::NonZeroExit {
                    command: invocation.display_command(),
                    code: *code,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Records statements; optionally fails any statement mentioning `fail_on`
pub(crate) struct RecordingDb {
    pub(crate) log: EventLog,
    pub(crate) fail_on: Option<String>,
}

impl RecordingDb {
    pub(crate) fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            fail_on: None,
        }
    }

    pub(crate) fn failing(log: &EventLog, needle: &str) -> Self {
        Self {
            log: log.clone(),
            fail_on: Some(needle.to_string()),
        }
    }
}

#[async_trait]
impl Database for RecordingDb {
    async fn execute(&self, sql: &str) -> DbResult<u64> {
        self.log.push(format!("sql: {}", sql));
        match &self.fail_on {
            Some(needle) if sql.contains(needle.as_str()) => Err(DbError::ExecutionError(
                format!("relation is locked: {}", sql),
            )),
            _ => Ok(0),
        }
    }

    fn db_type(&self) -> &'static str {
        "recording"
    }
}

/// Environment with every variable set and schema `app`
pub(crate) fn test_env() -> EnvConfig {
    EnvConfig::from_lookup(EnvRequirement::Auth, |key| {
        let value = match key {
            ops_core::env::DATABASE_URL => "postgres://u:p@localhost:5432/app",
            ops_core::env::DATABASE_SCHEMA => "app",
            ops_core::env::GOOGLE_CLIENT_ID => "client-id",
            ops_core::env::GOOGLE_CLIENT_SECRET => "client-secret",
            _ => return None,
        };
        Some(value.to_string())
    })
    .unwrap()
}

/// Context over the project in `dir` with the given doubles
pub(crate) fn test_context(
    dir: &Path,
    db: RecordingDb,
    runner: RecordingRunner,
) -> (RuntimeContext, Arc<RecordingRunner>) {
    let runner = Arc::new(runner);
    let ctx = RuntimeContext {
        project: Project::load(dir, None).unwrap(),
        env: test_env(),
        db: Arc::new(db),
        runner: runner.clone(),
        verbose: false,
    };
    (ctx, runner)
}

/// Write a table manifest under `<dir>/schema/<file>`
pub(crate) fn write_manifest(dir: &Path, file: &str, tables: &[&str]) {
    let schema_dir = dir.join("schema");
    std::fs::create_dir_all(&schema_dir).unwrap();
    let mut body = String::from("kind: tables\ntables:\n");
    for table in tables {
        body.push_str(&format!("  - {}\n", table));
    }
    std::fs::write(schema_dir.join(file), body).unwrap();
}
