//! Postgres database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;

/// Postgres database backend
///
/// The pool connects lazily: constructing a backend validates the URL but
/// opens no connection until the first statement runs.
pub struct PostgresBackend {
    pool: PgPool,
}

impl PostgresBackend {
    /// Create a lazily-connecting backend from a connection string
    pub fn connect_lazy(url: &str) -> DbResult<Self> {
        let options =
            PgConnectOptions::from_str(url).map_err(|e| DbError::InvalidUrl(e.to_string()))?;
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_lazy_with(options);
        Ok(Self { pool })
    }
}

#[async_trait]
impl Database for PostgresBackend {
    async fn execute(&self, sql: &str) -> DbResult<u64> {
        log::debug!("Executing: {}", sql);
        let result = sqlx::raw_sql(sql)
            .execute(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::ExecutionError(msg) => DbError::ExecutionError(format!("{}: {}", msg, sql)),
                other => other,
            })?;
        Ok(result.rows_affected())
    }

    fn db_type(&self) -> &'static str {
        "postgres"
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
#[path = "postgres_test.rs"]
mod tests;
