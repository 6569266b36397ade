//! Source database operations.

mod mssql;

pub use mssql::MssqlSource;

use async_trait::async_trait;

use crate::core::{RowValue, TableDescriptor, TableFilter};
use crate::error::Result;

/// One table's cursor result.
///
/// Columns are in cursor-native order; every row has one value per
/// column. The whole result set is drained before the next query runs on
/// the same connection, so no two server-side cursors are ever open at
/// once.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    /// Column names from the cursor's schema.
    pub columns: Vec<String>,

    /// Row values, converted at the driver boundary.
    pub rows: Vec<Vec<RowValue>>,
}

/// Trait for source database operations.
#[async_trait]
pub trait Source {
    /// Resolve the ordered sequence of base tables to dump.
    ///
    /// Applies the inclusion/exclusion filter and returns descriptors
    /// sorted ascending by table name.
    async fn list_tables(&mut self, filter: &TableFilter) -> Result<Vec<TableDescriptor>>;

    /// Read a table's rows, capped by `limit` at the query layer.
    async fn read_rows(
        &mut self,
        table: &TableDescriptor,
        limit: Option<u32>,
    ) -> Result<RowSet>;
}
