//! Error types for the dump library.

use thiserror::Error;

/// Main error type for dump operations.
#[derive(Error, Debug)]
pub enum DumpError {
    /// Configuration error (missing fields, invalid credential mode, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connecting or logging in to the server failed.
    #[error("Connection failed: {0}")]
    Connect(#[source] tiberius::error::Error),

    /// The catalog (metadata) query could not be executed.
    #[error("Catalog query failed: {0}")]
    Catalog(#[source] tiberius::error::Error),

    /// A table's row cursor failed mid-stream. Statements already written
    /// for prior tables remain in the output.
    #[error("Row read failed for table {table}: {source}")]
    RowRead {
        table: String,
        #[source]
        source: tiberius::error::Error,
    },

    /// IO error (writing to the output sink, reading config files).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DumpError {
    /// Create a RowRead error for a specific table.
    pub fn row_read(table: impl Into<String>, source: tiberius::error::Error) -> Self {
        DumpError::RowRead {
            table: table.into(),
            source,
        }
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            DumpError::Config(_) => 2,
            DumpError::Connect(_) | DumpError::Catalog(_) => 3,
            DumpError::RowRead { .. } => 4,
            _ => 1,
        }
    }
}

/// Result type alias for dump operations.
pub type Result<T> = std::result::Result<T, DumpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(DumpError::Config("bad".into()).exit_code(), 2);
        let io = DumpError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x"));
        assert_eq!(io.exit_code(), 1);
    }

    #[test]
    fn test_format_detailed_includes_message() {
        let err = DumpError::Config("user is required".into());
        let detail = err.format_detailed();
        assert!(detail.starts_with("Error: Configuration error: user is required"));
    }
}
