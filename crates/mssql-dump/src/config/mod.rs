//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl DumpConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: DumpConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_minimal() {
        let yaml = r#"
connection:
  server: db.example.com
  database: Northwind
  user: sa
  password: hunter2
"#;
        let config = DumpConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.connection.port, 1433);
        assert_eq!(config.connection.schema, "dbo");
        assert!(config.connection.encrypt);
        assert!(config.dump.tables.is_empty());
        assert!(config.dump.limit.is_none());
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = r#"
connection:
  server: db.example.com
  port: 14330
  database: Northwind
  auth: integrated
  schema: sales
dump:
  limit: 100
  transaction: true
  identity_insert: true
  tables: [Orders, Customers]
  exclusive: true
"#;
        let config = DumpConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.connection.auth, AuthMode::Integrated);
        assert_eq!(config.dump.limit, Some(100));
        assert!(config.dump.exclusive);
        assert_eq!(config.dump.tables.len(), 2);
    }

    #[test]
    fn test_from_yaml_rejects_invalid() {
        let yaml = r#"
connection:
  server: db.example.com
  database: Northwind
"#;
        // sql auth is the default and has no credentials here
        assert!(DumpConfig::from_yaml(yaml).is_err());
    }
}
