//! Configuration types and parsing for dbops.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// File names searched for in the project directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["dbops.yml", "dbops.yaml"];

/// Absolute migrations directory, exported to the migration tool so its own
/// config (`out:`) resolves the same folder init removes.
pub const DRIZZLE_MIGRATIONS_DIR: &str = "DRIZZLE_MIGRATIONS_DIR";

/// Project configuration from dbops.yml
///
/// Every field has a default, so a project without a config file behaves
/// exactly like one with an empty file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Schema-migration tool settings
    #[serde(default)]
    pub drizzle: DrizzleConfig,

    /// Auth-schema generator settings
    #[serde(default)]
    pub better_auth: BetterAuthConfig,
}

/// External program plus the leading arguments that select it.
///
/// `npx drizzle-kit` is `program: npx`, `args: [drizzle-kit]`.
pub trait ToolCommand {
    /// Executable resolved through PATH
    fn program(&self) -> &str;
    /// Arguments placed before the subcommand
    fn base_args(&self) -> &[String];
}

/// Settings for the external schema-migration tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DrizzleConfig {
    /// Tool config file handed over as `--config=<path>`
    #[serde(default = "default_drizzle_config")]
    pub config: String,

    /// Directory holding generated migration files
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Directory holding `*.yml` table manifests
    #[serde(default = "default_schema_dir")]
    pub schema_dir: String,

    /// Executable
    #[serde(default = "default_npx")]
    pub program: String,

    /// Leading arguments
    #[serde(default = "default_drizzle_args")]
    pub args: Vec<String>,
}

impl Default for DrizzleConfig {
    fn default() -> Self {
        Self {
            config: default_drizzle_config(),
            migrations_dir: default_migrations_dir(),
            schema_dir: default_schema_dir(),
            program: default_npx(),
            args: default_drizzle_args(),
        }
    }
}

impl ToolCommand for DrizzleConfig {
    fn program(&self) -> &str {
        &self.program
    }
    fn base_args(&self) -> &[String] {
        &self.args
    }
}

/// Settings for the external auth-schema generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BetterAuthConfig {
    /// Auth config module handed over as `--config=<path>`
    #[serde(default = "default_auth_config")]
    pub config: String,

    /// Generated schema file handed over as `--output=<path>`
    #[serde(default = "default_auth_schema_output")]
    pub schema_output: String,

    /// Directory created before generation
    #[serde(default = "default_auth_output_dir")]
    pub output_dir: String,

    /// Executable
    #[serde(default = "default_npx")]
    pub program: String,

    /// Leading arguments
    #[serde(default = "default_auth_args")]
    pub args: Vec<String>,
}

impl Default for BetterAuthConfig {
    fn default() -> Self {
        Self {
            config: default_auth_config(),
            schema_output: default_auth_schema_output(),
            output_dir: default_auth_output_dir(),
            program: default_npx(),
            args: default_auth_args(),
        }
    }
}

impl ToolCommand for BetterAuthConfig {
    fn program(&self) -> &str {
        &self.program
    }
    fn base_args(&self) -> &[String] {
        &self.args
    }
}

fn default_drizzle_config() -> String {
    "cli/drizzle/drizzle.config.ts".to_string()
}

fn default_migrations_dir() -> String {
    "cli/drizzle/migrations".to_string()
}

fn default_schema_dir() -> String {
    "schema".to_string()
}

fn default_npx() -> String {
    "npx".to_string()
}

fn default_drizzle_args() -> Vec<String> {
    vec!["drizzle-kit".to_string()]
}

fn default_auth_config() -> String {
    "cli/better-auth/auth.ts".to_string()
}

fn default_auth_schema_output() -> String {
    "cli/better-auth/output/auth-schema.ts".to_string()
}

fn default_auth_output_dir() -> String {
    "cli/better-auth/output".to_string()
}

fn default_auth_args() -> Vec<String> {
    vec!["@better-auth/cli".to_string()]
}

impl ProjectConfig {
    /// Load configuration from an explicit file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&content, path)
    }

    /// Load configuration from a project directory
    ///
    /// Looks for dbops.yml or dbops.yaml and falls back to defaults when
    /// neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.exists())
        {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("No dbops.yml in {}, using defaults", dir.display());
                Ok(Self::default())
            }
        }
    }

    fn parse(content: &str, path: &Path) -> CoreResult<Self> {
        // An empty file deserializes to unit, not to a struct.
        let config: ProjectConfig = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.drizzle.program.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "drizzle.program cannot be empty".to_string(),
            });
        }
        if self.better_auth.program.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "better_auth.program cannot be empty".to_string(),
            });
        }

        // init deletes this directory recursively
        let migrations = Path::new(&self.drizzle.migrations_dir);
        let has_normal_component = migrations
            .components()
            .any(|c| matches!(c, Component::Normal(_)));
        let escapes = migrations
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        if !has_normal_component || escapes || migrations.has_root() {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "drizzle.migrations_dir '{}' must be a subdirectory of the project",
                    self.drizzle.migrations_dir
                ),
            });
        }

        Ok(())
    }
}

/// Project root plus its loaded configuration, with path resolution.
#[derive(Debug, Clone)]
pub struct Project {
    /// Absolute project directory
    pub root: PathBuf,

    /// Loaded configuration
    pub config: ProjectConfig,
}

impl Project {
    /// Load the project rooted at `dir`, optionally overriding the config file.
    pub fn load(dir: &Path, config_override: Option<&Path>) -> CoreResult<Self> {
        let root = std::path::absolute(dir).map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;
        let config = match config_override {
            Some(path) => ProjectConfig::load(path)?,
            None => ProjectConfig::load_from_dir(&root)?,
        };
        Ok(Self { root, config })
    }

    /// Resolve a configured path against the project root
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Absolute path of the migration tool's config file
    pub fn drizzle_config_path(&self) -> PathBuf {
        self.resolve(&self.config.drizzle.config)
    }

    /// Absolute path of the migrations directory
    pub fn migrations_dir(&self) -> PathBuf {
        self.resolve(&self.config.drizzle.migrations_dir)
    }

    /// Resolved paths exported to every migration tool invocation
    pub fn drizzle_env(&self) -> Vec<(String, String)> {
        vec![(
            DRIZZLE_MIGRATIONS_DIR.to_string(),
            self.migrations_dir().display().to_string(),
        )]
    }

    /// Absolute path of the table manifest directory
    pub fn schema_dir(&self) -> PathBuf {
        self.resolve(&self.config.drizzle.schema_dir)
    }

    /// Absolute path of the auth config module
    pub fn auth_config_path(&self) -> PathBuf {
        self.resolve(&self.config.better_auth.config)
    }

    /// Absolute path of the generated auth schema
    pub fn auth_schema_output(&self) -> PathBuf {
        self.resolve(&self.config.better_auth.schema_output)
    }

    /// Absolute path of the auth output directory
    pub fn auth_output_dir(&self) -> PathBuf {
        self.resolve(&self.config.better_auth.output_dir)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
