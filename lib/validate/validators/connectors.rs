//! Connector (MCP server) validation.

use std::path::Path;

use serde_json::{Map, Value};

use crate::connector::{
    ConnectorEntry, ConnectorSource, Transport, TransportKind, is_conventional_reference,
    resolve_source,
};
use crate::constants::{CONNECTOR_FILE, MCP_SERVERS_KEY};
use crate::error::BundleError;
use crate::manifest::{BundleManifest, Field, json_type_name};
use crate::persist::read_json;
use crate::vars::{has_unterminated_interpolation, uses_interpolation};

use super::super::codes::{ErrorCode, WarningCode};
use super::super::result::ValidationResult;
use super::core::{invalid_type, manifest_location};
use super::paths::display_relative;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// Env var name suffixes that usually carry secrets.
const SECRET_ENV_SUFFIXES: &[&str] = &["_TOKEN", "_SECRET", "_API_KEY", "_PASSWORD"];

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Validate connector definitions wherever they are stored.
///
/// When inline entries and the external file both exist, the inline entries
/// are validated and the external ones are only named in a conflict warning.
pub fn validate_connectors(dir: &Path, manifest: &BundleManifest, result: &mut ValidationResult) {
    if let Field::Invalid(value) = &manifest.mcp_servers {
        invalid_type(
            result,
            manifest_location(MCP_SERVERS_KEY),
            "an object or a path string",
            value,
        );
    }

    match resolve_source(dir, manifest) {
        ConnectorSource::Absent => {}
        ConnectorSource::Inline { shadowed } => {
            if let Some(servers) = manifest.inline_connectors() {
                validate_entries(servers, &manifest_location(MCP_SERVERS_KEY), result);
            }
            if let Some(path) = shadowed {
                report_conflict(dir, &path, result);
            }
        }
        ConnectorSource::External { path, referenced } => {
            validate_connector_file(dir, &path, result);
            if let Some(reference) = referenced
                && !is_conventional_reference(&reference)
            {
                reference_mismatch(
                    result,
                    format!(
                        "`{}` is referenced but the connector file is `{}`",
                        reference, CONNECTOR_FILE
                    ),
                );
            }
        }
        ConnectorSource::Unresolved { reference } => {
            reference_mismatch(
                result,
                format!(
                    "`{}` is referenced but `{}` does not exist",
                    reference, CONNECTOR_FILE
                ),
            );
        }
    }
}

/// Validate one named connector entry.
///
/// `location` is the location of the containing `mcpServers` mapping.
pub fn validate_entry(name: &str, value: &Value, location: &str) -> ValidationResult {
    let mut result = ValidationResult::default();
    let location = format!("{}.{}", location, name);

    if !value.is_object() {
        result.error(
            ErrorCode::InvalidConnectorField,
            "invalid connector entry",
            location,
            format!("expected an object, found {}", json_type_name(value)),
        );
        return result;
    }

    let entry = match ConnectorEntry::from_value(value) {
        Ok(entry) => entry,
        Err(e) => {
            result.error(
                ErrorCode::InvalidConnectorField,
                "invalid connector entry",
                location,
                e.to_string(),
            );
            return result;
        }
    };

    let transport = match entry.transport_kind() {
        TransportKind::Known(transport) => transport,
        TransportKind::Unknown(other) => {
            let issue = result.warning(
                WarningCode::UnknownTransport,
                "unknown transport",
                format!("{}.transport", location),
                format!("`{}` is not one of: {}", other, Transport::NAMES.join(", ")),
            );
            if let Some(suggestion) = Transport::suggest(other.trim_matches('"')) {
                issue.help(format!("did you mean `{}`?", suggestion));
            }
            return result;
        }
    };

    match transport {
        Transport::Stdio => {
            require_text(&entry.command, "command", transport, &location, &mut result);
            check_shape(&entry.args, "args", "an array of strings", &location, &mut result);
            check_shape(&entry.env, "env", "a string mapping", &location, &mut result);
            foreign_field(entry.url.is_declared(), "url", transport, &location, &mut result);
            foreign_field(entry.headers.is_declared(), "headers", transport, &location, &mut result);
        }
        Transport::Http => {
            require_text(&entry.url, "url", transport, &location, &mut result);
            check_shape(&entry.headers, "headers", "a string mapping", &location, &mut result);
            foreign_field(entry.command.is_declared(), "command", transport, &location, &mut result);
            foreign_field(entry.args.is_declared(), "args", transport, &location, &mut result);
            foreign_field(entry.env.is_declared(), "env", transport, &location, &mut result);

            if let Some(url) = entry.url.as_present()
                && !url.trim().is_empty()
                && !uses_interpolation(url)
                && !(url.starts_with("http://") || url.starts_with("https://"))
            {
                result.warning(
                    WarningCode::InvalidUrl,
                    "invalid url",
                    format!("{}.url", location),
                    format!("`{}` is not an http(s) URL", url),
                );
            }
        }
    }

    check_interpolation(&entry, &location, &mut result);
    check_credentials(&entry, &location, &mut result);

    result
}

/// Validate every entry of an `mcpServers` mapping.
fn validate_entries(servers: &Map<String, Value>, location: &str, result: &mut ValidationResult) {
    for (name, value) in servers {
        result.extend(validate_entry(name, value, location));
    }
}

/// Parse an external connector file and validate its entries.
fn validate_connector_file(dir: &Path, path: &Path, result: &mut ValidationResult) {
    let file = display_relative(dir, path);

    let root = match read_json(path) {
        Ok(root) => root,
        Err(e) => {
            let details = match e {
                BundleError::MalformedDocument { message, .. } => format!("parse error: {}", message),
                other => other.to_string(),
            };
            result
                .error(
                    ErrorCode::MalformedDocument,
                    "invalid connector file",
                    file,
                    details,
                )
                .help("check JSON syntax");
            return;
        }
    };

    let root = match root {
        Value::Object(root) => root,
        other => {
            invalid_type(result, file, "an object", &other);
            return;
        }
    };

    let location = format!("{}:{}", file, MCP_SERVERS_KEY);
    match root.get(MCP_SERVERS_KEY) {
        None | Some(Value::Null) => {
            result.error(
                ErrorCode::MissingRequiredField,
                "missing required field",
                location,
                format!("field `{}` is required", MCP_SERVERS_KEY),
            );
        }
        Some(Value::Object(servers)) => validate_entries(servers, &location, result),
        Some(other) => invalid_type(result, location, "an object", other),
    }
}

/// Report a string `mcpServers` that does not match the connector file.
///
/// The reference is a cross-check only; it is never followed.
fn reference_mismatch(result: &mut ValidationResult, details: String) {
    result
        .warning(
            WarningCode::ConnectorPathMismatch,
            "connector path mismatch",
            manifest_location(MCP_SERVERS_KEY),
            details,
        )
        .help(format!(
            "keep connectors in ./{} and point `{}` at it",
            CONNECTOR_FILE, MCP_SERVERS_KEY
        ));
}

/// Emit the single conflict warning for inline entries shadowing a file.
fn report_conflict(dir: &Path, path: &Path, result: &mut ValidationResult) {
    let file = display_relative(dir, path);

    let ignored = match read_json(path) {
        Ok(Value::Object(root)) => match root.get(MCP_SERVERS_KEY) {
            Some(Value::Object(servers)) => servers.keys().cloned().collect::<Vec<_>>(),
            _ => Vec::new(),
        },
        Ok(_) => Vec::new(),
        Err(e) => {
            result.error(
                ErrorCode::MalformedDocument,
                "invalid connector file",
                file.clone(),
                e.to_string(),
            );
            Vec::new()
        }
    };

    let details = if ignored.is_empty() {
        format!("inline `{}` takes precedence over `{}`", MCP_SERVERS_KEY, file)
    } else {
        format!(
            "inline `{}` takes precedence over `{}`; ignored entries: {}",
            MCP_SERVERS_KEY,
            file,
            ignored.join(", ")
        )
    };

    result
        .warning(
            WarningCode::ConflictingConnectorStorage,
            "conflicting connector storage",
            manifest_location(MCP_SERVERS_KEY),
            details,
        )
        .help(format!(
            "keep connectors either inline or in {}, not both",
            CONNECTOR_FILE
        ));
}

/// Require a non-empty string field for the declared transport.
fn require_text(
    field: &Field<String>,
    key: &str,
    transport: Transport,
    location: &str,
    result: &mut ValidationResult,
) {
    match field {
        Field::Present(value) if !value.trim().is_empty() => {}
        Field::Invalid(value) => {
            result.error(
                ErrorCode::InvalidConnectorField,
                "invalid connector field",
                format!("{}.{}", location, key),
                format!("expected a string, found {}", json_type_name(value)),
            );
        }
        _ => {
            result
                .error(
                    ErrorCode::TransportFieldMissing,
                    format!("missing `{}`", key),
                    location,
                    format!("{} transport requires a non-empty `{}`", transport, key),
                )
                .help(format!("add `{}` to the entry", key));
        }
    }
}

/// Report an optional field with the wrong shape.
fn check_shape<T>(
    field: &Field<T>,
    key: &str,
    expected: &str,
    location: &str,
    result: &mut ValidationResult,
) {
    if let Field::Invalid(value) = field {
        result.error(
            ErrorCode::InvalidConnectorField,
            "invalid connector field",
            format!("{}.{}", location, key),
            format!("expected {}, found {}", expected, describe(value)),
        );
    }
}

/// Report a field that belongs to the other transport.
fn foreign_field(
    declared: bool,
    key: &str,
    transport: Transport,
    location: &str,
    result: &mut ValidationResult,
) {
    if declared {
        result.warning(
            WarningCode::ForeignTransportField,
            "field ignored for transport",
            format!("{}.{}", location, key),
            format!("`{}` has no effect with {} transport", key, transport),
        );
    }
}

/// Flag values with an unterminated `${`.
fn check_interpolation(entry: &ConnectorEntry, location: &str, result: &mut ValidationResult) {
    let mut values: Vec<(String, &str)> = Vec::new();

    if let Some(command) = entry.command.as_present() {
        values.push(("command".into(), command));
    }
    if let Some(url) = entry.url.as_present() {
        values.push(("url".into(), url));
    }
    if let Some(args) = entry.args.as_present() {
        for (i, arg) in args.iter().enumerate() {
            values.push((format!("args[{}]", i), arg));
        }
    }
    if let Some(env) = entry.env.as_present() {
        for (key, value) in env {
            values.push((format!("env.{}", key), value));
        }
    }
    if let Some(headers) = entry.headers.as_present() {
        for (key, value) in headers {
            values.push((format!("headers.{}", key), value));
        }
    }

    for (key, value) in values {
        if has_unterminated_interpolation(value) {
            result
                .warning(
                    WarningCode::MalformedInterpolation,
                    "malformed interpolation",
                    format!("{}.{}", location, key),
                    format!("`{}` has a `${{` without a closing `}}`", value),
                )
                .help("use ${NAME} or ${NAME:-default}");
        }
    }
}

/// Flag credentials written as literals instead of env references.
fn check_credentials(entry: &ConnectorEntry, location: &str, result: &mut ValidationResult) {
    if let Some(headers) = entry.headers.as_present() {
        for (key, value) in headers {
            if key.eq_ignore_ascii_case("authorization")
                && !value.trim().is_empty()
                && !uses_interpolation(value)
            {
                literal_credential(format!("{}.headers.{}", location, key), result);
            }
        }
    }

    if let Some(env) = entry.env.as_present() {
        for (key, value) in env {
            let upper = key.to_ascii_uppercase();
            if SECRET_ENV_SUFFIXES.iter().any(|s| upper.ends_with(s))
                && !value.trim().is_empty()
                && !uses_interpolation(value)
            {
                literal_credential(format!("{}.env.{}", location, key), result);
            }
        }
    }
}

fn literal_credential(location: String, result: &mut ValidationResult) {
    result
        .warning(
            WarningCode::LiteralCredential,
            "literal credential",
            location,
            "secret value is written literally",
        )
        .help("reference an environment variable, e.g. ${API_TOKEN}");
}

/// Describe a mistyped value, including nested non-string members.
fn describe(value: &Value) -> String {
    match value {
        Value::Array(items) => match items.iter().find(|v| !v.is_string()) {
            Some(item) => format!("an array containing {}", json_type_name(item)),
            None => "array".into(),
        },
        Value::Object(map) => match map.values().find(|v| !v.is_string()) {
            Some(item) => format!("an object containing {}", json_type_name(item)),
            None => "object".into(),
        },
        other => json_type_name(other).into(),
    }
}
