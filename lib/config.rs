//! Runtime configuration resolved from the environment.

use crate::constants::CONNECTOR_STORAGE_ENV;
use crate::error::{BundleError, BundleResult};
use std::fmt;
use std::str::FromStr;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Where connector definitions are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectorStorage {
    /// Sibling `.mcp.json` file.
    #[default]
    External,
    /// `mcpServers` mapping embedded in the manifest.
    Inline,
}

/// Settings shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct BundleConfig {
    /// Storage used for the first connector of a bundle.
    pub connector_storage: ConnectorStorage,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl BundleConfig {
    /// Load configuration from the process environment.
    ///
    /// Unset or empty variables fall back to defaults; unparseable values are
    /// reported rather than ignored.
    pub fn from_env() -> BundleResult<Self> {
        let connector_storage = match std::env::var(CONNECTOR_STORAGE_ENV) {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => ConnectorStorage::default(),
        };

        Ok(Self { connector_storage })
    }

    /// Override the connector storage (e.g. from `--inline`).
    pub fn with_connector_storage(mut self, storage: ConnectorStorage) -> Self {
        self.connector_storage = storage;
        self
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for ConnectorStorage {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "external" | "file" => Ok(Self::External),
            "inline" | "manifest" => Ok(Self::Inline),
            other => Err(BundleError::Generic(format!(
                "{} must be `external` or `inline`, got `{}`",
                CONNECTOR_STORAGE_ENV, other
            ))),
        }
    }
}

impl fmt::Display for ConnectorStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::External => write!(f, "external"),
            Self::Inline => write!(f, "inline"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_parse() {
        assert_eq!(
            "external".parse::<ConnectorStorage>().unwrap(),
            ConnectorStorage::External
        );
        assert_eq!(
            " Inline ".parse::<ConnectorStorage>().unwrap(),
            ConnectorStorage::Inline
        );
        assert!("both".parse::<ConnectorStorage>().is_err());
    }

    #[test]
    fn test_override_storage() {
        let config = BundleConfig::default().with_connector_storage(ConnectorStorage::Inline);
        assert_eq!(config.connector_storage, ConnectorStorage::Inline);
    }
}
