// Declared output shapes for structured completions.
//
// Serialized in the Gemini `responseSchema` dialect: upper-case type names,
// `properties` / `required` on objects, `items` on arrays.

use serde_json::{json, Map, Value};

/// A JSON output shape the model is asked to honour
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String { allowed: Vec<String> },
    Number,
    Array(Box<Schema>),
    Object {
        properties: Vec<(String, Schema)>,
        required: Vec<String>,
    },
}

impl Schema {
    pub fn string() -> Self {
        Schema::String {
            allowed: Vec::new(),
        }
    }

    /// A string restricted to the given values
    pub fn one_of(values: &[&str]) -> Self {
        Schema::String {
            allowed: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn number() -> Self {
        Schema::Number
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array(Box::new(items))
    }

    pub fn object(properties: Vec<(&str, Schema)>, required: &[&str]) -> Self {
        Schema::Object {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect(),
            required: required.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Schema::String { allowed } if allowed.is_empty() => json!({ "type": "STRING" }),
            Schema::String { allowed } => json!({ "type": "STRING", "enum": allowed }),
            Schema::Number => json!({ "type": "NUMBER" }),
            Schema::Array(items) => json!({ "type": "ARRAY", "items": items.to_json() }),
            Schema::Object {
                properties,
                required,
            } => {
                let props: Map<String, Value> = properties
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.to_json()))
                    .collect();
                let mut object = json!({ "type": "OBJECT", "properties": props });
                if !required.is_empty() {
                    object["required"] = json!(required);
                }
                object
            }
        }
    }

    /// Empty document of this shape, used when the model sends no text
    pub fn empty_document(&self) -> &'static str {
        match self {
            Schema::Array(_) => "[]",
            Schema::Object { .. } => "{}",
            Schema::String { .. } => "\"\"",
            Schema::Number => "0",
        }
    }
}
