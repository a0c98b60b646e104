//! Recursive structural validator
//!
//! Pure with respect to both the data and the schema: validation never
//! mutates either, and the same input always yields the same report.

use crate::schema::types::Schema;
use serde_json::Value;
use std::fmt;

/// Outcome of validating a value against a schema.
///
/// Either valid (no errors) or an ordered, non-empty list of path-qualified
/// violations rooted at `root`, e.g. `root.items[2].severity should be <= 5`.
/// Every structural violation is reported, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    /// A report with no violations
    pub fn valid() -> Self {
        Self { errors: Vec::new() }
    }

    /// Build a report from collected error messages
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All violation messages, in the order they were discovered
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.errors.join("\n"))
    }
}

/// Structural validator for a fixed root schema.
///
/// Stateless apart from the shared read-only schema; safe to call from any
/// number of concurrent requests.
pub struct SchemaValidator {
    schema: Schema,
}

impl SchemaValidator {
    /// Create a validator with the given root schema
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// The root schema this validator was built with
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validate `data` against the root schema
    pub fn validate(&self, data: &Value) -> ValidationReport {
        self.validate_against(data, &self.schema)
    }

    /// Validate `data` against an alternate root on the same engine instance
    pub fn validate_against(&self, data: &Value, schema: &Schema) -> ValidationReport {
        let mut errors = Vec::new();
        walk(data, schema, "root", &mut errors);
        ValidationReport::from_errors(errors)
    }
}

/// Recursive dispatch on the schema type.
///
/// Composite nodes (object/array) fail fast only on a wrong top-level shape;
/// within a correctly-shaped node all child errors are collected.
fn walk(data: &Value, schema: &Schema, path: &str, errors: &mut Vec<String>) {
    match schema {
        Schema::Object {
            required,
            properties,
            additional_properties,
        } => {
            let Some(map) = data.as_object() else {
                errors.push(format!("{path} should be an object"));
                return;
            };

            for name in required {
                if !map.contains_key(name) {
                    errors.push(format!("{path}.{name} is required"));
                }
            }

            for (key, value) in map {
                if let Some(child) = properties.get(key) {
                    walk(value, child, &format!("{path}.{key}"), errors);
                } else if !additional_properties {
                    errors.push(format!("{path}.{key} is not allowed"));
                }
            }
        }

        Schema::Array { items } => {
            let Some(elements) = data.as_array() else {
                errors.push(format!("{path} should be an array"));
                return;
            };

            for (index, element) in elements.iter().enumerate() {
                walk(element, items, &format!("{path}[{index}]"), errors);
            }
        }

        Schema::String => {
            if !data.is_string() {
                errors.push(format!("{path} should be a string"));
            }
        }

        Schema::Number { minimum, maximum } => match data.as_f64() {
            None => errors.push(format!("{path} should be a number")),
            Some(n) => {
                // Bounds are inclusive.
                if let Some(min) = minimum {
                    if n < *min {
                        errors.push(format!("{path} should be >= {min}"));
                    }
                }
                if let Some(max) = maximum {
                    if n > *max {
                        errors.push(format!("{path} should be <= {max}"));
                    }
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn symptom_object_schema() -> Schema {
        Schema::object()
            .required("name", Schema::string())
            .required("severity", Schema::number_in(0.0, 5.0))
            .additional_properties(false)
            .build()
    }

    #[test]
    fn test_valid_object() {
        let validator = SchemaValidator::new(symptom_object_schema());
        let report = validator.validate(&json!({"name": "Fever", "severity": 3}));
        assert!(report.is_valid());
    }

    #[test]
    fn test_all_missing_required_fields_reported() {
        let validator = SchemaValidator::new(symptom_object_schema());
        let report = validator.validate(&json!({}));

        assert_eq!(
            report.errors(),
            &["root.name is required", "root.severity is required"]
        );
    }

    #[test]
    fn test_wrong_top_level_shape_fails_fast() {
        let validator = SchemaValidator::new(symptom_object_schema());
        let report = validator.validate(&json!("not an object"));
        assert_eq!(report.errors(), &["root should be an object"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let validator = SchemaValidator::new(Schema::number_in(0.0, 5.0));

        assert!(validator.validate(&json!(0)).is_valid());
        assert!(validator.validate(&json!(5)).is_valid());
        assert!(!validator.validate(&json!(-0.01)).is_valid());
        assert!(!validator.validate(&json!(5.01)).is_valid());
    }

    #[test]
    fn test_severity_above_max_reports_single_error() {
        let validator = SchemaValidator::new(symptom_object_schema());
        let report = validator.validate(&json!({"name": "Fever", "severity": 6}));

        assert_eq!(report.errors(), &["root.severity should be <= 5"]);
    }

    #[test]
    fn test_additional_property_rejected() {
        let validator = SchemaValidator::new(symptom_object_schema());
        let report =
            validator.validate(&json!({"name": "Fever", "severity": 1, "x": "extra"}));

        assert_eq!(report.errors(), &["root.x is not allowed"]);
    }

    #[test]
    fn test_array_collects_errors_per_element() {
        let validator = SchemaValidator::new(Schema::array(symptom_object_schema()));
        let report = validator.validate(&json!([
            {"name": "Fever", "severity": 1},
            {"name": 42, "severity": 9},
            {}
        ]));

        assert_eq!(
            report.errors(),
            &[
                "root[1].name should be a string",
                "root[1].severity should be <= 5",
                "root[2].name is required",
                "root[2].severity is required",
            ]
        );
    }

    #[test]
    fn test_array_path_addressing() {
        let validator = SchemaValidator::new(Schema::array(Schema::number_in(0.0, 5.0)));
        let report = validator.validate(&json!([1, 2, 7]));
        assert_eq!(report.errors(), &["root[2] should be <= 5"]);
    }

    #[test]
    fn test_number_accepts_integers_and_floats() {
        let validator = SchemaValidator::new(Schema::number());
        assert!(validator.validate(&json!(2)).is_valid());
        assert!(validator.validate(&json!(2.5)).is_valid());
        assert!(!validator.validate(&json!(null)).is_valid());
        assert!(!validator.validate(&json!("2")).is_valid());
        assert!(!validator.validate(&json!(true)).is_valid());
    }

    #[test]
    fn test_validate_against_alternate_root() {
        let validator = SchemaValidator::new(symptom_object_schema());
        let alternate = Schema::object()
            .required("message", Schema::string())
            .build();

        let report = validator.validate_against(&json!({"message": "hello"}), &alternate);
        assert!(report.is_valid());
    }

    #[test]
    fn test_validation_is_deterministic() {
        let validator = SchemaValidator::new(symptom_object_schema());
        let data = json!({"name": 1, "severity": "high", "extra": null});
        assert_eq!(validator.validate(&data), validator.validate(&data));
    }
}
