//! Schema declarations for the artifact families served by the cache
//!
//! Built once at startup and handed to a [`SchemaValidator`]; the validator
//! itself is parameterized per call, not hardwired to one family.
//!
//! [`SchemaValidator`]: crate::schema::SchemaValidator

use crate::schema::types::Schema;

/// Schema for a generated symptom report: a list of symptom records, each
/// with a name, description, severity on a 0-5 scale, and body location.
pub fn symptom_report() -> Schema {
    Schema::array(
        Schema::object()
            .required("name", Schema::string())
            .required("description", Schema::string())
            .required("severity", Schema::number_in(0.0, 5.0))
            .required("location", Schema::string())
            .additional_properties(false)
            .build(),
    )
}

/// Schema for a single generated chat message.
pub fn chat_message() -> Schema {
    Schema::object()
        .required("message", Schema::string())
        .additional_properties(false)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaValidator;
    use serde_json::json;

    #[test]
    fn test_symptom_report_accepts_wellformed_records() {
        let validator = SchemaValidator::new(symptom_report());
        let report = validator.validate(&json!([
            {"name": "Fever", "description": "Mild fever", "severity": 1, "location": "Head"},
            {"name": "Migraine", "description": "Pulsating pain", "severity": 4.5, "location": "Head"}
        ]));
        assert!(report.is_valid());
    }

    #[test]
    fn test_symptom_report_rejects_extra_fields() {
        let validator = SchemaValidator::new(symptom_report());
        let report = validator.validate(&json!([
            {"name": "Fatigue", "description": "Low energy", "severity": 2,
             "location": "Neurological", "duration": "2 days"}
        ]));
        assert_eq!(report.errors(), &["root[0].duration is not allowed"]);
    }

    #[test]
    fn test_chat_message_shape() {
        let validator = SchemaValidator::new(chat_message());
        assert!(validator.validate(&json!({"message": "hello"})).is_valid());
        assert!(!validator.validate(&json!({"message": 1})).is_valid());
        assert!(!validator.validate(&json!({"text": "hello"})).is_valid());
    }
}
