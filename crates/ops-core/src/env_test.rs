use super::*;
use std::fs;
use tempfile::tempdir;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_database_requirement_minimal() {
    let env = EnvConfig::from_lookup(
        EnvRequirement::Database,
        lookup_from(&[("DATABASE_URL", "postgres://localhost/app")]),
    )
    .unwrap();
    assert_eq!(env.database_url, "postgres://localhost/app");
    assert_eq!(env.database_schema, "public");
    assert!(env.google_client_id.is_none());
}

#[test]
fn test_missing_database_url() {
    let err = EnvConfig::from_lookup(EnvRequirement::Database, lookup_from(&[])).unwrap_err();
    match err {
        CoreError::MissingEnv { names } => assert_eq!(names, vec!["DATABASE_URL"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_value_counts_as_missing() {
    let err = EnvConfig::from_lookup(
        EnvRequirement::Database,
        lookup_from(&[("DATABASE_URL", "")]),
    )
    .unwrap_err();
    assert!(err.to_string().contains("DATABASE_URL"));
}

#[test]
fn test_whitespace_value_is_present() {
    let env = EnvConfig::from_lookup(
        EnvRequirement::Database,
        lookup_from(&[("DATABASE_URL", " ")]),
    )
    .unwrap();
    assert_eq!(env.database_url, " ");
}

#[test]
fn test_empty_schema_falls_back_to_public() {
    let env = EnvConfig::from_lookup(
        EnvRequirement::Database,
        lookup_from(&[("DATABASE_URL", "postgres://x"), ("DATABASE_SCHEMA", "")]),
    )
    .unwrap();
    assert_eq!(env.database_schema, DEFAULT_SCHEMA);
}

#[test]
fn test_custom_schema() {
    let env = EnvConfig::from_lookup(
        EnvRequirement::Database,
        lookup_from(&[("DATABASE_URL", "postgres://x"), ("DATABASE_SCHEMA", "my_app")]),
    )
    .unwrap();
    assert_eq!(env.database_schema, "my_app");
}

#[test]
fn test_auth_requirement_reports_all_missing_keys() {
    let err = EnvConfig::from_lookup(EnvRequirement::Auth, lookup_from(&[])).unwrap_err();
    match err {
        CoreError::MissingEnv { names } => assert_eq!(
            names,
            vec!["DATABASE_URL", "GOOGLE_CLIENT_ID", "GOOGLE_CLIENT_SECRET"]
        ),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_auth_credentials_optional_for_database_requirement() {
    let env = EnvConfig::from_lookup(
        EnvRequirement::Database,
        lookup_from(&[("DATABASE_URL", "postgres://x"), ("GOOGLE_CLIENT_ID", "id")]),
    )
    .unwrap();
    assert_eq!(env.google_client_id.as_deref(), Some("id"));
    assert!(env.google_client_secret.is_none());
}

#[test]
fn test_child_env_forwards_credentials_when_present() {
    let env = EnvConfig::from_lookup(
        EnvRequirement::Auth,
        lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("GOOGLE_CLIENT_ID", "id"),
            ("GOOGLE_CLIENT_SECRET", "secret"),
        ]),
    )
    .unwrap();
    let vars: HashMap<String, String> = env.child_env().into_iter().collect();
    assert_eq!(vars["DATABASE_URL"], "postgres://x");
    assert_eq!(vars["DATABASE_SCHEMA"], "public");
    assert_eq!(vars["GOOGLE_CLIENT_ID"], "id");
    assert_eq!(vars["GOOGLE_CLIENT_SECRET"], "secret");
}

#[test]
fn test_debug_redacts_secrets() {
    let env = EnvConfig::from_lookup(
        EnvRequirement::Auth,
        lookup_from(&[
            ("DATABASE_URL", "postgres://user:hunter2@db/app"),
            ("GOOGLE_CLIENT_ID", "id"),
            ("GOOGLE_CLIENT_SECRET", "topsecret"),
        ]),
    )
    .unwrap();
    let rendered = format!("{env:?}");
    assert!(!rendered.contains("hunter2"));
    assert!(!rendered.contains("topsecret"));
}

#[test]
fn test_env_local_takes_precedence_over_env() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".env.local"),
        "DATABASE_URL=postgres://local\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(".env"),
        "DATABASE_URL=postgres://shared\nDATABASE_SCHEMA=app\n",
    )
    .unwrap();

    let files = EnvFiles::load_default(dir.path()).unwrap();
    assert_eq!(files.get("DATABASE_URL"), Some("postgres://local"));
    assert_eq!(files.get("DATABASE_SCHEMA"), Some("app"));
    assert_eq!(files.paths().count(), 2);

    let env = EnvConfig::from_lookup(EnvRequirement::Database, |k| {
        files.get(k).map(String::from)
    })
    .unwrap();
    assert_eq!(env.database_url, "postgres://local");
    assert_eq!(env.database_schema, "app");
}

#[test]
fn test_empty_value_in_env_local_falls_through() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".env.local"), "DATABASE_URL=\n").unwrap();
    fs::write(dir.path().join(".env"), "DATABASE_URL=postgres://shared\n").unwrap();

    let files = EnvFiles::load_default(dir.path()).unwrap();
    assert_eq!(files.get("DATABASE_URL"), Some("postgres://shared"));
}

#[test]
fn test_no_env_files_is_fine() {
    let dir = tempdir().unwrap();
    let files = EnvFiles::load_default(dir.path()).unwrap();
    assert_eq!(files.paths().count(), 0);
    assert!(files.get("DATABASE_URL").is_none());
}

#[test]
fn test_explicit_env_file_must_exist() {
    let dir = tempdir().unwrap();
    let err = EnvFiles::load_explicit(&dir.path().join("missing.env")).unwrap_err();
    assert!(matches!(err, CoreError::EnvFileNotFound { .. }));
}

#[test]
fn test_explicit_env_file_ignores_defaults() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".env"), "DATABASE_URL=postgres://default\n").unwrap();
    let explicit = dir.path().join("ci.env");
    fs::write(&explicit, "DATABASE_URL=postgres://ci\n").unwrap();

    let files = EnvFiles::load_explicit(&explicit).unwrap();
    assert_eq!(files.get("DATABASE_URL"), Some("postgres://ci"));
    assert_eq!(files.paths().collect::<Vec<_>>(), vec![explicit.as_path()]);
}
