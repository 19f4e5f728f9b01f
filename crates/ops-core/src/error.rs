//! Error types for ops-core

use thiserror::Error;

/// Core error type for dbops
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config {path}: {message}")]
    ConfigParseError { path: String, message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: One or more required environment variables are missing or empty
    #[error("[E004] Missing required environment variable(s): {}", .names.join(", "))]
    MissingEnv { names: Vec<String> },

    /// E005: An explicitly requested env file does not exist
    #[error("[E005] Env file not found: {path}")]
    EnvFileNotFound { path: String },

    /// E006: Failed to parse an env file
    #[error("[E006] Failed to parse env file {path}: {message}")]
    EnvFileParseError { path: String, message: String },

    /// E007: Schema directory not found
    #[error("[E007] Schema directory not found: {path}")]
    SchemaDirNotFound { path: String },

    /// E008: Failed to parse a table manifest
    #[error("[E008] Failed to parse table manifest {path}: {message}")]
    ManifestParseError { path: String, message: String },

    /// E009: Invalid table name in a manifest
    #[error("[E009] Invalid table name '{name}' in {path}: {reason}")]
    InvalidTableName {
        name: String,
        path: String,
        reason: String,
    },

    /// E010: IO error with file path context
    #[error("[E010] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
