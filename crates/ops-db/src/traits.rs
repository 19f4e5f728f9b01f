//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;
use ops_core::sql_utils::drop_table_cascade;

/// Database abstraction used by the reset tool
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute a single SQL statement, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<u64>;

    /// Drop `schema.table` and everything depending on it, if it exists
    async fn drop_table_cascade(&self, schema: &str, table: &str) -> DbResult<()> {
        self.execute(&drop_table_cascade(schema, table)).await?;
        Ok(())
    }

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;

    /// Release pooled connections
    async fn close(&self) {}
}
