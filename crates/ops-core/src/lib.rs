//! ops-core - Core library for dbops
//!
//! This crate provides the environment loader, project configuration, the
//! schema table manifests, and SQL quoting helpers shared by the database
//! layer and the CLI.

pub mod config;
pub mod env;
pub mod error;
pub mod schema;
pub mod sql_utils;
pub mod table_name;

pub use config::{BetterAuthConfig, DrizzleConfig, Project, ProjectConfig, ToolCommand};
pub use env::{EnvConfig, EnvFiles, EnvRequirement};
pub use error::{CoreError, CoreResult};
pub use schema::TableSet;
pub use table_name::TableName;
