use crate::errors::{ErrorKind, FrameworkError, FrameworkResult};

/// Configuration of the connection collaborator.
///
/// # Usage
/// ```rust
/// use ddd_framework::store::ConnectionConfig;
///
/// let config = ConnectionConfig::new("memory://local", "shop");
/// assert_eq!(config.database_name(), "shop");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionConfig {
    uri: String,
    database_name: String,
}

impl ConnectionConfig {
    pub fn new(uri: &str, database_name: &str) -> Self {
        ConnectionConfig {
            uri: uri.to_string(),
            database_name: database_name.to_string(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Checks that the database name is usable.
    pub fn validate(&self) -> FrameworkResult<()> {
        if self.database_name.trim().is_empty() {
            log::error!("Connection config for '{}' has an empty database name", self.uri);
            return Err(FrameworkError::new(
                "Database name must not be empty",
                ErrorKind::ConfigurationError,
            ));
        }
        if self.database_name.contains(['/', '\\', '.', ' ', '"', '$']) {
            log::error!("Invalid database name '{}'", self.database_name);
            return Err(FrameworkError::new(
                &format!("Invalid database name '{}'", self.database_name),
                ErrorKind::ConfigurationError,
            ));
        }
        Ok(())
    }
}
