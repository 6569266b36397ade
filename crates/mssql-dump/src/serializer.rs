//! Row serialization: insert statements and identity bracketing.
//!
//! Everything here is synchronous and pure over an in-memory `RowSet`,
//! so statement shapes are testable without a database.

use std::io::Write;

use crate::core::literal::{self, quote_ident};
use crate::core::{DumpOptions, RowValue, TableDescriptor};
use crate::error::Result;
use crate::source::RowSet;

/// Render an identity-insert toggle statement.
pub fn identity_insert_stmt(table: &str, on: bool) -> String {
    format!(
        "set identity_insert {} {}",
        quote_ident(table),
        if on { "on" } else { "off" }
    )
}

/// Render a single insert statement.
pub fn render_insert(table: &str, columns: &[&str], values: &[&RowValue]) -> String {
    let cols = columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let vals = values
        .iter()
        .map(|v| literal::encode(v))
        .collect::<Vec<_>>()
        .join(", ");
    format!("insert into {} ({}) values ({})", quote_ident(table), cols, vals)
}

/// Indices of the columns to emit, applied identically to the column
/// list and the value list so the two stay in lockstep.
fn projected_columns(
    columns: &[String],
    identity: Option<&str>,
    include_identity: bool,
) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, name)| {
            include_identity || identity.is_none_or(|id| !name.eq_ignore_ascii_case(id))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Write one table's block: optional identity-insert bracketing around
/// one insert statement per row. Returns the number of rows written.
///
/// Bracketing is emitted even for a table with zero rows ("always emit
/// toggle" policy; a toggle with no rows is a harmless no-op).
pub fn write_table<W: Write>(
    table: &TableDescriptor,
    rows: &RowSet,
    options: &DumpOptions,
    out: &mut W,
) -> Result<u64> {
    let bracket = options.include_identity_insert && table.identity_column.is_some();
    let keep = projected_columns(
        &rows.columns,
        table.identity_column.as_deref(),
        options.include_identity_insert,
    );
    let columns: Vec<&str> = keep.iter().map(|&i| rows.columns[i].as_str()).collect();

    if bracket {
        writeln!(out, "{}", identity_insert_stmt(&table.name, true))?;
        writeln!(out)?;
    }

    let mut written = 0u64;
    for row in &rows.rows {
        let values: Vec<&RowValue> = keep.iter().map(|&i| &row[i]).collect();
        writeln!(out, "{}", render_insert(&table.name, &columns, &values))?;
        written += 1;
    }

    if bracket {
        writeln!(out)?;
        writeln!(out, "{}", identity_insert_stmt(&table.name, false))?;
    }

    Ok(written)
}
