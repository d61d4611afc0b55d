//! Tri-state field wrapper for schema-checked documents.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A document field that is missing, present with the wrong shape, or present.
///
/// Deserializing a `Field<T>` never fails: a value that does not fit `T` is
/// kept as [`Field::Invalid`] so validators can report it alongside every
/// other finding. Explicit `null` counts as missing.
///
/// Use `#[serde(default)]` on struct fields so absent keys become
/// [`Field::Missing`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    /// Key absent or `null`.
    Missing,
    /// Key present but the value has the wrong shape.
    Invalid(Value),
    /// Key present with a well-typed value.
    Present(T),
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl<T> Field<T> {
    /// Borrow the value if present and well-typed.
    pub fn as_present(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }

    /// Returns true if the key is absent or null.
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    /// Returns true if the key is present (well-typed or not).
    pub fn is_declared(&self) -> bool {
        !self.is_missing()
    }
}

/// JSON type name of a value, for diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Field::Missing);
        }

        Ok(match T::deserialize(&value) {
            Ok(typed) => Field::Present(typed),
            Err(_) => Field::Invalid(value),
        })
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default)]
        name: Field<String>,
        #[serde(default)]
        args: Field<Vec<String>>,
        #[serde(default)]
        env: Field<BTreeMap<String, String>>,
    }

    #[test]
    fn test_three_states() {
        let probe: Probe =
            serde_json::from_str(r#"{ "name": 42, "args": ["a", "b"] }"#).unwrap();

        assert_eq!(probe.name, Field::Invalid(serde_json::json!(42)));
        assert_eq!(
            probe.args,
            Field::Present(vec!["a".to_string(), "b".to_string()])
        );
        assert!(probe.env.is_missing());
    }

    #[test]
    fn test_null_is_missing() {
        let probe: Probe = serde_json::from_str(r#"{ "name": null }"#).unwrap();
        assert!(probe.name.is_missing());
        assert!(!probe.name.is_declared());
    }

    #[test]
    fn test_wrong_container_shape() {
        let probe: Probe =
            serde_json::from_str(r#"{ "args": "--flag", "env": ["A=1"] }"#).unwrap();
        assert!(matches!(probe.args, Field::Invalid(_)));
        assert!(matches!(probe.env, Field::Invalid(_)));
        assert_eq!(probe.args.as_present(), None);
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&serde_json::json!([])), "array");
        assert_eq!(json_type_name(&serde_json::json!("x")), "string");
    }
}
