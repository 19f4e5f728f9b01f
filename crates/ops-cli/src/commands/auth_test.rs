use super::*;
use crate::test_support::{test_context, EventLog, RecordingDb, RecordingRunner};
use tempfile::TempDir;

#[test]
fn test_generate_invocation_args() {
    let dir = TempDir::new().unwrap();
    let log = EventLog::default();
    let (ctx, _) = test_context(dir.path(), RecordingDb::new(&log), RecordingRunner::new(&log));

    let inv = generate_invocation(&ctx);
    let root = &ctx.project.root;
    assert_eq!(inv.program, "npx");
    assert_eq!(
        inv.args,
        vec![
            "@better-auth/cli".to_string(),
            "generate".to_string(),
            format!("--config={}", root.join("cli/better-auth/auth.ts").display()),
            format!(
                "--output={}",
                root.join("cli/better-auth/output/auth-schema.ts").display()
            ),
        ]
    );
    assert!(inv
        .envs
        .contains(&("GOOGLE_CLIENT_SECRET".to_string(), "client-secret".to_string())));
}

#[tokio::test]
async fn test_generate_creates_output_dir() {
    let dir = TempDir::new().unwrap();
    let log = EventLog::default();
    let (ctx, runner) = test_context(dir.path(), RecordingDb::new(&log), RecordingRunner::new(&log));

    generate(&ctx).await.unwrap();

    assert!(dir.path().join("cli/better-auth/output").is_dir());
    assert_eq!(runner.invocations.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_generate_failure_exits_one() {
    let dir = TempDir::new().unwrap();
    let log = EventLog::default();
    let (ctx, _) = test_context(
        dir.path(),
        RecordingDb::new(&log),
        RecordingRunner::failing(&log, "generate", 5),
    );

    let err = generate(&ctx).await.unwrap_err();
    assert_eq!(err.downcast_ref::<ExitCode>().map(|c| c.0), Some(1));
}

#[tokio::test]
async fn test_migrate_delegates_to_migration_tool() {
    let dir = TempDir::new().unwrap();
    let log = EventLog::default();
    let (ctx, _) = test_context(dir.path(), RecordingDb::new(&log), RecordingRunner::new(&log));

    migrate(&ctx).await.unwrap();

    let tools = log.tools();
    assert_eq!(tools.len(), 1);
    assert!(tools[0].starts_with("npx drizzle-kit migrate --config="));
}

#[tokio::test]
async fn test_migrate_failure_exits_one_regardless_of_tool_code() {
    let dir = TempDir::new().unwrap();
    let log = EventLog::default();
    let (ctx, _) = test_context(
        dir.path(),
        RecordingDb::new(&log),
        RecordingRunner::failing(&log, "migrate", 4),
    );

    let err = migrate(&ctx).await.unwrap_err();
    assert_eq!(err.downcast_ref::<ExitCode>().map(|c| c.0), Some(1));
}
