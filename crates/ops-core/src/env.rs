//! Environment loading for CLI operations
//!
//! Values are resolved once at startup from the process environment, layered
//! over optional `.env.local` and `.env` files, and validated against what the
//! requested command needs. The result is an immutable [`EnvConfig`] that is
//! passed explicitly to every operation and forwarded to child processes.

use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Postgres connection string
pub const DATABASE_URL: &str = "DATABASE_URL";
/// Schema namespace the tables live in
pub const DATABASE_SCHEMA: &str = "DATABASE_SCHEMA";
/// Google OAuth client id read by the auth schema generator
pub const GOOGLE_CLIENT_ID: &str = "GOOGLE_CLIENT_ID";
/// Google OAuth client secret read by the auth schema generator
pub const GOOGLE_CLIENT_SECRET: &str = "GOOGLE_CLIENT_SECRET";

/// Schema namespace used when `DATABASE_SCHEMA` is unset or empty.
pub const DEFAULT_SCHEMA: &str = "public";

/// Env files consulted by default, highest precedence first.
pub const DEFAULT_ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Which variables a command needs before it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvRequirement {
    /// Database connection only
    Database,
    /// Database connection plus the OAuth credential pair
    Auth,
}

impl EnvRequirement {
    /// Keys that must be present and non-empty.
    pub fn required_keys(self) -> &'static [&'static str] {
        match self {
            EnvRequirement::Database => &[DATABASE_URL],
            EnvRequirement::Auth => &[DATABASE_URL, GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET],
        }
    }
}

/// Validated environment configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// Postgres connection string
    pub database_url: String,

    /// Schema namespace (defaults to `public`)
    pub database_schema: String,

    /// OAuth client id, present when set in the environment
    pub google_client_id: Option<String>,

    /// OAuth client secret, present when set in the environment
    pub google_client_secret: Option<String>,
}

impl EnvConfig {
    /// Build a config from an arbitrary key lookup.
    ///
    /// Empty values are treated as absent. Every missing required key is
    /// reported in a single error.
    pub fn from_lookup<F>(requirement: EnvRequirement, lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let missing: Vec<String> = requirement
            .required_keys()
            .iter()
            .filter(|key| get(**key).is_none())
            .map(|key| key.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::MissingEnv { names: missing });
        }

        Ok(Self {
            database_url: get(DATABASE_URL).unwrap_or_default(),
            database_schema: get(DATABASE_SCHEMA).unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            google_client_id: get(GOOGLE_CLIENT_ID),
            google_client_secret: get(GOOGLE_CLIENT_SECRET),
        })
    }

    /// Resolve against the process environment layered over `files`.
    pub fn load(requirement: EnvRequirement, files: &EnvFiles) -> CoreResult<Self> {
        Self::from_lookup(requirement, |key| {
            std::env::var(key)
                .ok()
                .filter(|v| !v.is_empty())
                .or_else(|| files.get(key).map(String::from))
        })
    }

    /// Variables forwarded to external tools.
    pub fn child_env(&self) -> Vec<(String, String)> {
        let mut vars = vec![
            (DATABASE_URL.to_string(), self.database_url.clone()),
            (DATABASE_SCHEMA.to_string(), self.database_schema.clone()),
        ];
        if let Some(id) = &self.google_client_id {
            vars.push((GOOGLE_CLIENT_ID.to_string(), id.clone()));
        }
        if let Some(secret) = &self.google_client_secret {
            vars.push((GOOGLE_CLIENT_SECRET.to_string(), secret.clone()));
        }
        vars
    }
}

impl fmt::Debug for EnvConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvConfig")
            .field("database_url", &"<redacted>")
            .field("database_schema", &self.database_schema)
            .field("google_client_id", &self.google_client_id)
            .field(
                "google_client_secret",
                &self.google_client_secret.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Values read from env files, highest precedence layer first.
#[derive(Debug, Default, Clone)]
pub struct EnvFiles {
    layers: Vec<(PathBuf, HashMap<String, String>)>,
}

impl EnvFiles {
    /// Read `.env.local` then `.env` from `dir`; either may be absent.
    pub fn load_default(dir: &Path) -> CoreResult<Self> {
        let mut files = Self::default();
        for name in DEFAULT_ENV_FILES {
            let path = dir.join(name);
            if path.is_file() {
                files.push(&path)?;
            } else {
                log::debug!("No env file at {}", path.display());
            }
        }
        Ok(files)
    }

    /// Read exactly one env file, which must exist.
    pub fn load_explicit(path: &Path) -> CoreResult<Self> {
        if !path.is_file() {
            return Err(CoreError::EnvFileNotFound {
                path: path.display().to_string(),
            });
        }
        let mut files = Self::default();
        files.push(path)?;
        Ok(files)
    }

    fn push(&mut self, path: &Path) -> CoreResult<()> {
        let parse_err = |e: dotenvy::Error| CoreError::EnvFileParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        let mut values = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(parse_err)? {
            let (key, value) = item.map_err(parse_err)?;
            // First assignment wins within a file.
            values.entry(key).or_insert(value);
        }
        log::debug!("Loaded {} value(s) from {}", values.len(), path.display());
        self.layers.push((path.to_path_buf(), values));
        Ok(())
    }

    /// Look up a key across layers, skipping empty values.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers
            .iter()
            .filter_map(|(_, values)| values.get(key))
            .map(String::as_str)
            .find(|v| !v.is_empty())
    }

    /// Files that were read, in precedence order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.layers.iter().map(|(p, _)| p.as_path())
    }
}

#[cfg(test)]
#[path = "env_test.rs"]
mod tests;
