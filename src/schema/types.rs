//! Declarative schema type for validating generated artifacts
//!
//! Schemas are built once at startup, either in code or from a JSON-Schema-like
//! declaration, and shared read-only across all validations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recursive structural type descriptor.
///
/// Each variant carries only the fields meaningful for its type, so a schema
/// node can never mix, say, `items` with `properties`. The serde
/// representation matches the external declaration form:
///
/// ```json
/// {
///   "type": "object",
///   "required": ["name"],
///   "properties": { "name": { "type": "string" } },
///   "additionalProperties": false
/// }
/// ```
///
/// A declaration naming a type outside this closed vocabulary is rejected
/// when the schema is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Schema {
    /// Key/value structure with required fields and per-property schemas
    Object {
        #[serde(default)]
        required: Vec<String>,
        #[serde(default)]
        properties: BTreeMap<String, Schema>,
        /// Whether keys outside `properties` are tolerated. Permissive by
        /// default, matching the declaration form.
        #[serde(default = "default_true", rename = "additionalProperties")]
        additional_properties: bool,
    },

    /// Homogeneous sequence; every element validates against `items`
    Array { items: Box<Schema> },

    /// Textual value, no further constraints
    String,

    /// Numeric value (integer or floating), with optional inclusive bounds
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minimum: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum: Option<f64>,
    },
}

fn default_true() -> bool {
    true
}

impl Schema {
    /// Shorthand for a string schema
    pub fn string() -> Self {
        Schema::String
    }

    /// Shorthand for an unbounded number schema
    pub fn number() -> Self {
        Schema::Number {
            minimum: None,
            maximum: None,
        }
    }

    /// Shorthand for a number schema with inclusive bounds
    pub fn number_in(minimum: f64, maximum: f64) -> Self {
        Schema::Number {
            minimum: Some(minimum),
            maximum: Some(maximum),
        }
    }

    /// Shorthand for an array schema
    pub fn array(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
        }
    }

    /// Start building an object schema
    pub fn object() -> ObjectSchemaBuilder {
        ObjectSchemaBuilder::default()
    }
}

/// Builder for object schemas
#[derive(Debug, Default)]
pub struct ObjectSchemaBuilder {
    required: Vec<String>,
    properties: BTreeMap<String, Schema>,
    additional_properties: Option<bool>,
}

impl ObjectSchemaBuilder {
    /// Declare a property schema
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Declare a property that must be present
    pub fn required(mut self, name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.properties.insert(name, schema);
        self
    }

    /// Allow or reject keys outside the declared properties
    pub fn additional_properties(mut self, allow: bool) -> Self {
        self.additional_properties = Some(allow);
        self
    }

    /// Build the object schema
    pub fn build(self) -> Schema {
        Schema::Object {
            required: self.required,
            properties: self.properties,
            additional_properties: self.additional_properties.unwrap_or(true),
        }
    }
}
