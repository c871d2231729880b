mod postgres;

pub use postgres::PostgresSource;

use async_trait::async_trait;

use crate::error::ChatbotResult;
use crate::models::{ColumnMeta, TabularData};
use crate::trusted::TrustedQuery;

/// Read access to the relational database rows are trained from.
///
/// Implementations acquire a connection per call and release it before returning.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationalSource: Send + Sync {
    /// Names of the base tables visible to the connection
    async fn list_tables(&self) -> ChatbotResult<Vec<String>>;

    /// Columns of `table` in ordinal order. Unknown tables yield an empty list.
    async fn list_columns(&self, table: &str) -> ChatbotResult<Vec<ColumnMeta>>;

    /// Every row of `table`.
    ///
    /// Fails with `InvalidTable` if `table` is not an existing base table.
    async fn fetch_table(&self, table: &str) -> ChatbotResult<TabularData>;

    /// Every row produced by an authorized query.
    ///
    /// Database-side failures surface as `QueryExecution`.
    async fn fetch_query(&self, query: &TrustedQuery) -> ChatbotResult<TabularData>;

    /// Round-trip to the database for readiness checks
    async fn ping(&self) -> ChatbotResult<()>;
}
