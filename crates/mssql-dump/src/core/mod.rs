//! Core dump model: value union, literal encoding, table metadata.

pub mod literal;
pub mod schema;
pub mod value;

pub use schema::{DumpOptions, TableDescriptor, TableFilter};
pub use value::RowValue;
