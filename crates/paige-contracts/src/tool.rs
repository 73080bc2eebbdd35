//! Tool contract types.
//!
//! A `ToolSpec` is everything the governing language model sees about a
//! tool: its name, its description, and the JSON Schema of its parameters.
//! These strings are part of the external interface and must not drift.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// The model-facing description of one callable tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Name the model uses in function calls (e.g. "get_office_hours").
    pub name: String,
    /// Natural-language description the model uses to decide invocation.
    pub description: String,
    /// JSON Schema object describing the arguments.
    pub parameters: Value,
}

impl ToolSpec {
    /// Build a spec with no parameters.
    pub fn no_args(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }

    /// Build a spec from an explicit parameter schema.
    pub fn with_parameters(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Render the OpenAI function-calling definition for this tool.
    pub fn to_definition(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

/// Arguments for one tool call, as decoded from the model's JSON.
///
/// Wraps a JSON object. A call without arguments is represented by an
/// empty object, never by `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolArgs(pub Map<String, Value>);

impl ToolArgs {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Convert a decoded JSON value into arguments.
    ///
    /// `null` becomes an empty argument set; any other non-object value is
    /// returned unchanged as the error so callers can report it.
    pub fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(other),
        }
    }

    /// Builder-style insert, handy in tests and in the console.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// The argument as a string, if present and a string.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// An optional string argument. JSON `null` and absence both map to `None`.
    pub fn opt_str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}
