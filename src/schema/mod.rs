//! Structural validation of generated artifacts
//!
//! The schema vocabulary is a closed set of four types (object, array,
//! string, number) expressed as a tagged-variant [`Schema`]. Validation
//! collects every violation as a path-qualified message rather than stopping
//! at the first.

pub mod presets;
pub mod types;
pub mod validator;

pub use types::{ObjectSchemaBuilder, Schema};
pub use validator::{SchemaValidator, ValidationReport};
