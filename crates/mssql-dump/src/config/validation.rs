//! Configuration validation.

use super::{AuthMode, DumpConfig};
use crate::error::{DumpError, Result};

/// Validate the configuration.
///
/// Runs before any connection attempt so that credential problems never
/// produce partial output.
pub fn validate(config: &DumpConfig) -> Result<()> {
    if config.connection.server.is_empty() {
        return Err(DumpError::Config("connection.server is required".into()));
    }
    if config.connection.database.is_empty() {
        return Err(DumpError::Config("connection.database is required".into()));
    }

    if config.connection.auth == AuthMode::Sql {
        let user_ok = config
            .connection
            .user
            .as_deref()
            .is_some_and(|u| !u.is_empty());
        let password_ok = config
            .connection
            .password
            .as_deref()
            .is_some_and(|p| !p.is_empty());

        if !user_ok || !password_ok {
            return Err(DumpError::Config(
                "sql authentication requires both user and password".into(),
            ));
        }
    }

    Ok(())
}
