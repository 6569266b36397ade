//! Table metadata and dump option types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A base table selected for the dump.
///
/// Produced once per run by the table selector; identifies at most one
/// identity column per table. Multi-identity schemas are unsupported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Table name (unique within the dump run).
    pub name: String,

    /// Auto-increment column name, if the table has one.
    pub identity_column: Option<String>,
}

impl TableDescriptor {
    /// Create a descriptor without an identity column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identity_column: None,
        }
    }

    /// Create a descriptor with an identity column.
    pub fn with_identity(name: impl Into<String>, identity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identity_column: Some(identity.into()),
        }
    }
}

/// Inclusion/exclusion filter over table names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableFilter {
    names: BTreeSet<String>,
    exclusive: bool,
}

impl TableFilter {
    /// Build a filter from a list of names and an exclusivity flag.
    pub fn new<I, S>(names: I, exclusive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            exclusive,
        }
    }

    /// Whether the filter names any tables at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether the name list is an exclusion list.
    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    /// The named tables, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Decide whether a table participates in the dump.
    ///
    /// Empty filter selects everything; an inclusion list selects only the
    /// named tables; an exclusion list selects everything but them.
    #[must_use]
    pub fn selects(&self, table: &str) -> bool {
        if self.names.is_empty() {
            return true;
        }
        self.names.contains(table) != self.exclusive
    }
}

/// Options governing a dump run. Constructed once from the resolved
/// configuration; read-only for the duration of the dump.
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Maximum rows per table, enforced at the query layer.
    pub limit: Option<u32>,

    /// Emit identity columns, bracketed by identity_insert toggles.
    pub include_identity_insert: bool,

    /// Table selection filter.
    pub filter: TableFilter,
}
