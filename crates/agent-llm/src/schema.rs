//! Response schemas for structured output
//!
//! A [`ResponseSchema`] is a declarative JSON Schema value attached to a
//! [`CompletionRequest`](crate::CompletionRequest). Providers translate it
//! into their native structured-output setting. The helpers below build the
//! common shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// JSON schema the model's answer must conform to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSchema(Value);

impl ResponseSchema {
    /// Wrap a schema value
    pub fn new(schema: Value) -> Self {
        Self(schema)
    }

    /// The raw schema value
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume into the raw schema value
    pub fn into_value(self) -> Value {
        self.0
    }
}

/// Create a JSON schema for an object with properties
///
/// # Example
///
/// ```
/// use agent_llm::schema;
/// use serde_json::json;
///
/// let schema = schema::object(
///     json!({
///         "headline": schema::string("News headline"),
///     }),
///     &["headline"],
/// );
/// assert_eq!(schema["required"][0], "headline");
/// ```
pub fn object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// String property schema
pub fn string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
    })
}

/// String property restricted to a fixed set of values
pub fn string_enum(description: &str, values: &[&str]) -> Value {
    json!({
        "type": "string",
        "description": description,
        "enum": values,
    })
}

/// Array schema
pub fn array(items: Value) -> Value {
    json!({
        "type": "array",
        "items": items,
    })
}
