//! Cell value union for dump serialization.
//!
//! `RowValue` is a closed tagged union constructed once at the database
//! driver boundary and pattern-matched exhaustively by the literal
//! encoder. Numeric and other plain-text kinds arrive pre-rendered in
//! `Other` using invariant (non-localized) formatting, so the encoder
//! never touches locale-sensitive conversion.

use chrono::NaiveDateTime;
use uuid::Uuid;

/// A single cell value read from a row cursor.
///
/// Produced per cell when reading a row, consumed immediately by the
/// literal encoder, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    /// Source-reported NULL, regardless of declared column type.
    Null,

    /// Character data.
    Text(String),

    /// Timestamp without timezone, millisecond precision on output.
    Timestamp(NaiveDateTime),

    /// Binary data.
    Binary(Vec<u8>),

    /// GUID/UUID value.
    Uuid(Uuid),

    /// Bit/boolean value.
    Bool(bool),

    /// Anything else, carried as its invariant textual representation
    /// (covers the numeric types).
    Other(String),
}

impl RowValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, RowValue::Null)
    }
}

// From implementations for common types

impl From<bool> for RowValue {
    fn from(v: bool) -> Self {
        RowValue::Bool(v)
    }
}

impl From<String> for RowValue {
    fn from(v: String) -> Self {
        RowValue::Text(v)
    }
}

impl From<&str> for RowValue {
    fn from(v: &str) -> Self {
        RowValue::Text(v.to_string())
    }
}

impl From<Vec<u8>> for RowValue {
    fn from(v: Vec<u8>) -> Self {
        RowValue::Binary(v)
    }
}

impl From<Uuid> for RowValue {
    fn from(v: Uuid) -> Self {
        RowValue::Uuid(v)
    }
}

impl From<NaiveDateTime> for RowValue {
    fn from(v: NaiveDateTime) -> Self {
        RowValue::Timestamp(v)
    }
}

impl From<i32> for RowValue {
    fn from(v: i32) -> Self {
        RowValue::Other(v.to_string())
    }
}

impl From<i64> for RowValue {
    fn from(v: i64) -> Self {
        RowValue::Other(v.to_string())
    }
}

impl From<f64> for RowValue {
    fn from(v: f64) -> Self {
        RowValue::Other(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null() {
        assert!(RowValue::Null.is_null());
        assert!(!RowValue::Bool(false).is_null());
        assert!(!RowValue::Text(String::new()).is_null());
    }

    #[test]
    fn test_from_implementations() {
        assert_eq!(RowValue::from(42i32), RowValue::Other("42".to_string()));
        assert_eq!(RowValue::from(true), RowValue::Bool(true));
        assert_eq!(
            RowValue::from("hello"),
            RowValue::Text("hello".to_string())
        );
        assert_eq!(RowValue::from(1.5f64), RowValue::Other("1.5".to_string()));
    }
}
