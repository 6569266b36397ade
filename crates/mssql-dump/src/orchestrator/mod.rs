//! Dump orchestrator - main workflow coordinator.

use std::io::Write;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::DumpOptions;
use crate::error::Result;
use crate::serializer;
use crate::source::Source;

/// Dump orchestrator.
///
/// Owns the source handle for the duration of the run and drives the
/// strictly sequential dump: one catalog query, then one row cursor per
/// table in selector order, written to the sink as it goes.
pub struct Dumper<S> {
    source: S,
    options: DumpOptions,
    wrap_transaction: bool,
}

/// Result of a dump run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpSummary {
    /// Tables dumped.
    pub tables: usize,

    /// Insert statements written.
    pub rows: u64,

    /// Total duration in seconds.
    pub duration_seconds: f64,
}

impl DumpSummary {
    /// Serialize the summary as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<S: Source> Dumper<S> {
    /// Create a new dumper over a connected source.
    pub fn new(source: S, options: DumpOptions) -> Self {
        Self {
            source,
            options,
            wrap_transaction: false,
        }
    }

    /// Wrap the whole dump in begin/commit transaction lines.
    pub fn with_transaction(mut self, wrap: bool) -> Self {
        self.wrap_transaction = wrap;
        self
    }

    /// Run the dump, writing statements to the sink.
    ///
    /// Already-written text is never rolled back: a row-read failure in
    /// table N leaves the statements for tables 1..N in the sink.
    pub async fn run<W: Write>(&mut self, out: &mut W) -> Result<DumpSummary> {
        let started = Instant::now();

        let tables = self.source.list_tables(&self.options.filter).await?;
        info!("Dumping {} tables", tables.len());

        if self.wrap_transaction {
            writeln!(out, "begin transaction")?;
        }

        let mut rows_total = 0u64;
        for (index, table) in tables.iter().enumerate() {
            // Blank separator before every table block (and after the
            // begin-transaction line).
            if index > 0 || self.wrap_transaction {
                writeln!(out)?;
            }

            debug!("Dumping table {}", table.name);
            let rows = self.source.read_rows(table, self.options.limit).await?;
            rows_total += serializer::write_table(table, &rows, &self.options, out)?;
        }

        if self.wrap_transaction {
            writeln!(out)?;
            writeln!(out, "commit transaction")?;
        }

        let summary = DumpSummary {
            tables: tables.len(),
            rows: rows_total,
            duration_seconds: started.elapsed().as_secs_f64(),
        };

        info!(
            "Dump complete: {} tables, {} rows in {:.2}s",
            summary.tables, summary.rows, summary.duration_seconds
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::core::{RowValue, TableDescriptor, TableFilter};
    use crate::source::RowSet;

    /// In-memory source mirroring the selector contract: filter applied
    /// via `TableFilter::selects`, result sorted by name, limit applied
    /// at the "query layer".
    #[derive(Clone)]
    struct FakeSource {
        tables: Vec<(TableDescriptor, RowSet)>,
    }

    #[async_trait]
    impl Source for FakeSource {
        async fn list_tables(&mut self, filter: &TableFilter) -> Result<Vec<TableDescriptor>> {
            let mut tables: Vec<TableDescriptor> = self
                .tables
                .iter()
                .map(|(descriptor, _)| descriptor.clone())
                .filter(|descriptor| filter.selects(&descriptor.name))
                .collect();
            tables.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(tables)
        }

        async fn read_rows(
            &mut self,
            table: &TableDescriptor,
            limit: Option<u32>,
        ) -> Result<RowSet> {
            let mut rows = self
                .tables
                .iter()
                .find(|(descriptor, _)| descriptor.name == table.name)
                .map(|(_, rows)| rows.clone())
                .unwrap_or_default();
            if let Some(n) = limit {
                rows.rows.truncate(n as usize);
            }
            Ok(rows)
        }
    }

    fn rowset(columns: &[&str], rows: Vec<Vec<RowValue>>) -> RowSet {
        RowSet {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    fn sample_source() -> FakeSource {
        // Deliberately out of name order to exercise selector sorting.
        FakeSource {
            tables: vec![
                (
                    TableDescriptor::new("Orders"),
                    rowset(&["Ref"], vec![vec![2i32.into()], vec![3i32.into()]]),
                ),
                (
                    TableDescriptor::with_identity("Customers", "Id"),
                    rowset(
                        &["Id", "Name"],
                        vec![vec![1i32.into(), "O'Brien".into()]],
                    ),
                ),
            ],
        }
    }

    async fn dump_to_string(mut dumper: Dumper<FakeSource>) -> (String, DumpSummary) {
        let mut buf = Vec::new();
        let summary = dumper.run(&mut buf).await.unwrap();
        (String::from_utf8(buf).unwrap(), summary)
    }

    #[tokio::test]
    async fn test_plain_dump_sorted_and_separated() {
        let dumper = Dumper::new(sample_source(), DumpOptions::default());
        let (text, summary) = dump_to_string(dumper).await;

        assert_eq!(
            text,
            "insert into [Customers] ([Name]) values ('O''Brien')\n\
             \n\
             insert into [Orders] ([Ref]) values (2)\n\
             insert into [Orders] ([Ref]) values (3)\n"
        );
        assert_eq!(summary.tables, 2);
        assert_eq!(summary.rows, 3);
    }

    #[tokio::test]
    async fn test_transaction_wrapping() {
        let dumper =
            Dumper::new(sample_source(), DumpOptions::default()).with_transaction(true);
        let (text, _) = dump_to_string(dumper).await;

        assert!(text.starts_with("begin transaction\n\n"));
        assert!(text.ends_with("\ncommit transaction\n"));
    }

    #[tokio::test]
    async fn test_identity_insert_full_output() {
        let options = DumpOptions {
            include_identity_insert: true,
            filter: TableFilter::new(["Customers"], false),
            ..Default::default()
        };
        let dumper = Dumper::new(sample_source(), options);
        let (text, _) = dump_to_string(dumper).await;

        assert_eq!(
            text,
            "set identity_insert [Customers] on\n\
             \n\
             insert into [Customers] ([Id], [Name]) values (1, 'O''Brien')\n\
             \n\
             set identity_insert [Customers] off\n"
        );
    }

    #[tokio::test]
    async fn test_exclusion_filter() {
        let options = DumpOptions {
            filter: TableFilter::new(["Customers"], true),
            ..Default::default()
        };
        let dumper = Dumper::new(sample_source(), options);
        let (text, summary) = dump_to_string(dumper).await;

        assert_eq!(summary.tables, 1);
        assert!(text.contains("[Orders]"));
        assert!(!text.contains("[Customers]"));
    }

    #[tokio::test]
    async fn test_row_limit() {
        let options = DumpOptions {
            limit: Some(1),
            ..Default::default()
        };
        let dumper = Dumper::new(sample_source(), options);
        let (text, summary) = dump_to_string(dumper).await;

        assert_eq!(summary.rows, 2); // one per table
        assert_eq!(text.matches("insert into [Orders]").count(), 1);
    }

    #[tokio::test]
    async fn test_output_is_deterministic() {
        let options = DumpOptions::default();
        let first = dump_to_string(Dumper::new(sample_source(), options.clone())).await;
        let second = dump_to_string(Dumper::new(sample_source(), options)).await;
        assert_eq!(first.0, second.0);
    }
}
