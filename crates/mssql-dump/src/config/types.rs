//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::core::{DumpOptions, TableFilter};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpConfig {
    /// Connection settings for the source server.
    pub connection: ConnectionConfig,

    /// Dump behavior settings.
    #[serde(default)]
    pub dump: DumpSettings,
}

/// Authentication mode for the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// SQL Server authentication with username and password.
    #[default]
    Sql,

    /// Integrated (trusted) authentication.
    Integrated,
}

/// Source server connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server host name or address.
    pub server: String,

    /// Server port (default: 1433).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Authentication mode (default: sql).
    #[serde(default)]
    pub auth: AuthMode,

    /// Username (required for sql auth).
    #[serde(default)]
    pub user: Option<String>,

    /// Password (required for sql auth). Never serialized back out.
    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    /// Schema to dump (default: "dbo").
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Encrypt the connection (default: true).
    #[serde(default = "default_true")]
    pub encrypt: bool,

    /// Trust the server certificate (default: false).
    #[serde(default)]
    pub trust_server_cert: bool,
}

/// Dump behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DumpSettings {
    /// Maximum rows to dump per table (unrestricted if not set).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Wrap the whole dump in begin/commit transaction lines.
    #[serde(default)]
    pub transaction: bool,

    /// Emit identity columns, bracketed by identity_insert toggles.
    #[serde(default)]
    pub identity_insert: bool,

    /// Table name filter (empty: all base tables).
    #[serde(default)]
    pub tables: Vec<String>,

    /// Treat the table list as an exclusion list instead of an inclusion list.
    #[serde(default)]
    pub exclusive: bool,
}

impl DumpSettings {
    /// Build the core dump options from these settings.
    pub fn to_options(&self) -> DumpOptions {
        DumpOptions {
            limit: self.limit,
            include_identity_insert: self.identity_insert,
            filter: TableFilter::new(self.tables.iter().cloned(), self.exclusive),
        }
    }
}

// Default value functions for serde

fn default_port() -> u16 {
    1433
}

fn default_schema() -> String {
    "dbo".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connection() -> ConnectionConfig {
        ConnectionConfig {
            server: "localhost".to_string(),
            port: 1433,
            database: "Northwind".to_string(),
            auth: AuthMode::Sql,
            user: Some("sa".to_string()),
            password: Some("secret_password".to_string()),
            schema: "dbo".to_string(),
            encrypt: false,
            trust_server_cert: true,
        }
    }

    #[test]
    fn test_password_not_serialized() {
        let json = serde_json::to_string(&connection()).unwrap();
        assert!(
            !json.contains("secret_password"),
            "Password was serialized: {}",
            json
        );
    }

    #[test]
    fn test_settings_to_options() {
        let settings = DumpSettings {
            limit: Some(10),
            transaction: true,
            identity_insert: true,
            tables: vec!["Orders".to_string()],
            exclusive: true,
        };

        let options = settings.to_options();
        assert_eq!(options.limit, Some(10));
        assert!(options.include_identity_insert);
        assert!(options.filter.is_exclusive());
        assert!(!options.filter.selects("Orders"));
        assert!(options.filter.selects("Customers"));
    }
}
