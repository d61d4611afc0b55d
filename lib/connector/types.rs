//! Connector (MCP server) entry schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use strsim::jaro_winkler;

use crate::error::BundleError;
use crate::manifest::Field;
use crate::vars::extract_env_vars;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Minimum similarity for "did you mean" transport suggestions.
const MIN_SIMILARITY: f64 = 0.7;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Connection mechanism of a connector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Local process speaking over stdin/stdout.
    #[default]
    Stdio,
    /// Remote HTTP endpoint.
    Http,
}

/// Read-side view of one connector entry.
///
/// `type` is accepted as an alias for `transport`, matching host `.mcp.json`
/// files. A missing transport means stdio.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectorEntry {
    /// Declared transport.
    #[serde(default)]
    pub transport: Field<String>,

    /// Host spelling of `transport`, used when `transport` is absent.
    #[serde(default, rename = "type")]
    pub kind: Field<String>,

    /// Executable for stdio connectors.
    #[serde(default)]
    pub command: Field<String>,

    /// Arguments for stdio connectors.
    #[serde(default)]
    pub args: Field<Vec<String>>,

    /// Environment for stdio connectors.
    #[serde(default)]
    pub env: Field<BTreeMap<String, String>>,

    /// Endpoint for http connectors.
    #[serde(default)]
    pub url: Field<String>,

    /// Request headers for http connectors.
    #[serde(default)]
    pub headers: Field<BTreeMap<String, String>>,
}

/// How an entry's transport resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportKind {
    /// `stdio` or `http` (or absent, meaning stdio).
    Known(Transport),
    /// Any other value.
    Unknown(String),
}

/// A complete connector definition, as written by the merger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "transport", rename_all = "lowercase")]
pub enum ConnectorSpec {
    /// Local process connector.
    Stdio {
        command: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        env: BTreeMap<String, String>,
    },
    /// Remote HTTP connector.
    Http {
        url: String,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, String>,
    },
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Transport {
    /// Every supported transport name.
    pub const NAMES: [&'static str; 2] = ["stdio", "http"];

    /// Closest supported transport name, for typos like `stdi` or `https`.
    pub fn suggest(input: &str) -> Option<&'static str> {
        let input = input.to_lowercase();
        Self::NAMES
            .into_iter()
            .map(|name| (name, jaro_winkler(&input, name)))
            .filter(|(_, score)| *score >= MIN_SIMILARITY)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(name, _)| name)
    }
}

impl ConnectorEntry {
    /// Build the typed view of a JSON entry.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// Resolve the declared transport.
    pub fn transport_kind(&self) -> TransportKind {
        let declared = if self.transport.is_declared() {
            &self.transport
        } else {
            &self.kind
        };

        match declared {
            Field::Missing => TransportKind::Known(Transport::Stdio),
            Field::Present(name) => match name.parse() {
                Ok(transport) => TransportKind::Known(transport),
                Err(_) => TransportKind::Unknown(name.clone()),
            },
            Field::Invalid(value) => TransportKind::Unknown(value.to_string()),
        }
    }
}

impl ConnectorSpec {
    /// Transport of this definition.
    pub fn transport(&self) -> Transport {
        match self {
            ConnectorSpec::Stdio { .. } => Transport::Stdio,
            ConnectorSpec::Http { .. } => Transport::Http,
        }
    }

    /// Environment variable names the host must provide, sorted and unique.
    pub fn required_env_vars(&self) -> Vec<String> {
        let values: Vec<&str> = match self {
            ConnectorSpec::Stdio { command, args, env } => std::iter::once(command.as_str())
                .chain(args.iter().map(String::as_str))
                .chain(env.values().map(String::as_str))
                .collect(),
            ConnectorSpec::Http { url, headers } => std::iter::once(url.as_str())
                .chain(headers.values().map(String::as_str))
                .collect(),
        };

        values
            .into_iter()
            .flat_map(extract_env_vars)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// JSON form stored in `mcpServers`.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromStr for Transport {
    type Err = BundleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stdio" => Ok(Transport::Stdio),
            "http" => Ok(Transport::Http),
            _ => Err(BundleError::InvalidTransport {
                transport: s.to_string(),
                suggestion: Transport::suggest(s.trim()).map(str::to_string),
            }),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Stdio => write!(f, "stdio"),
            Transport::Http => write!(f, "http"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transport_parse() {
        assert_eq!("stdio".parse::<Transport>().unwrap(), Transport::Stdio);
        assert_eq!("HTTP".parse::<Transport>().unwrap(), Transport::Http);
        match "stdi".parse::<Transport>() {
            Err(BundleError::InvalidTransport { suggestion, .. }) => {
                assert_eq!(suggestion.as_deref(), Some("stdio"));
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(Transport::suggest("websocket").is_none());
    }

    #[test]
    fn test_transport_kind() {
        let missing = ConnectorEntry::from_value(&json!({ "command": "x" })).unwrap();
        assert_eq!(missing.transport_kind(), TransportKind::Known(Transport::Stdio));

        let alias = ConnectorEntry::from_value(&json!({ "type": "http", "url": "u" })).unwrap();
        assert_eq!(alias.transport_kind(), TransportKind::Known(Transport::Http));

        let both = ConnectorEntry::from_value(
            &json!({ "type": "http", "transport": "stdio", "command": "x" }),
        )
        .unwrap();
        assert_eq!(both.transport_kind(), TransportKind::Known(Transport::Stdio));

        let unknown = ConnectorEntry::from_value(&json!({ "transport": "sse" })).unwrap();
        assert_eq!(
            unknown.transport_kind(),
            TransportKind::Unknown("sse".into())
        );
    }

    #[test]
    fn test_spec_serialization() {
        let stdio = ConnectorSpec::Stdio {
            command: "npx".into(),
            args: vec!["-y".into(), "server".into()],
            env: BTreeMap::new(),
        };
        assert_eq!(
            stdio.to_value().unwrap(),
            json!({ "transport": "stdio", "command": "npx", "args": ["-y", "server"] })
        );

        let http = ConnectorSpec::Http {
            url: "https://api.example.org/mcp".into(),
            headers: BTreeMap::from([(
                "Authorization".to_string(),
                "Bearer ${API_TOKEN}".to_string(),
            )]),
        };
        assert_eq!(http.transport(), Transport::Http);
        assert_eq!(http.required_env_vars(), vec!["API_TOKEN".to_string()]);
        assert_eq!(
            http.to_value().unwrap(),
            json!({
                "transport": "http",
                "url": "https://api.example.org/mcp",
                "headers": { "Authorization": "Bearer ${API_TOKEN}" }
            })
        );
    }

    #[test]
    fn test_required_env_vars() {
        let stdio = ConnectorSpec::Stdio {
            command: "${BIN_DIR}/db".into(),
            args: vec!["--url".into(), "${DB_URL}".into(), "plain".into()],
            env: BTreeMap::from([
                ("DB_URL".to_string(), "${DB_URL}".to_string()),
                ("HOST".to_string(), "${HOST:-localhost}".to_string()),
            ]),
        };
        assert_eq!(stdio.required_env_vars(), vec!["BIN_DIR", "DB_URL", "HOST"]);
    }
}
