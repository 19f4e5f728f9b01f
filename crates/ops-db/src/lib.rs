//! ops-db - Database abstraction layer for dbops
//!
//! This crate provides the `Database` trait and its Postgres implementation.

pub mod error;
pub mod postgres;
pub mod traits;

pub use error::{DbError, DbResult};
pub use postgres::PostgresBackend;
pub use traits::Database;
