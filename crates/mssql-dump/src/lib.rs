//! # mssql-dump
//!
//! Library for exporting SQL Server base-table data as a sequence of
//! portable `insert` statements that can be replayed against another
//! instance of the same schema.
//!
//! The dump is strictly sequential: one connection, one catalog query,
//! then one row cursor per table in name order. Output is plain UTF-8
//! text written to any [`std::io::Write`] sink, so stdout stays clean of
//! diagnostics (those go through `tracing`).
//!
//! ## Example
//!
//! ```rust,no_run
//! use mssql_dump::{DumpConfig, Dumper, MssqlSource};
//!
//! #[tokio::main]
//! async fn main() -> mssql_dump::Result<()> {
//!     let config = DumpConfig::load("dump.yaml")?;
//!     let source = MssqlSource::connect(&config.connection).await?;
//!     let mut dumper = Dumper::new(source, config.dump.to_options())
//!         .with_transaction(config.dump.transaction);
//!     let stdout = std::io::stdout();
//!     let summary = dumper.run(&mut stdout.lock()).await?;
//!     eprintln!("Dumped {} rows from {} tables", summary.rows, summary.tables);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod orchestrator;
pub mod serializer;
pub mod source;

// Re-exports for convenient access
pub use config::{AuthMode, ConnectionConfig, DumpConfig, DumpSettings};
pub use crate::core::{DumpOptions, RowValue, TableDescriptor, TableFilter};
pub use error::{DumpError, Result};
pub use orchestrator::{DumpSummary, Dumper};
pub use source::{MssqlSource, RowSet, Source};
