//! External generator boundary
//!
//! The cache treats the generator as an opaque collaborator: any returned
//! text is raw material to be parsed, any failure is an unconditional
//! generation failure. Retry, backoff, and timeouts belong to the caller or
//! to the transport implementation, never to the cache core.

pub mod gemini;

use crate::error::Result;

pub use gemini::GeminiClient;

/// An external generative process producing raw text on demand.
#[allow(async_fn_in_trait)]
pub trait Generator: Send + Sync {
    /// Produce raw text for the given prompt.
    ///
    /// A response that arrives after the calling future is dropped is never
    /// observed; nothing downstream (validation, storage) runs for it.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Prompt for the symptom-report artifact family.
///
/// Describes the target shape informally; the structural guarantee comes
/// from validation, not from the prompt.
pub fn symptom_prompt(disease: &str) -> String {
    format!(
        r#"You are a medical simulation assistant. List the typical symptoms of "{disease}".

Respond with ONLY a JSON array. Each element must be an object with exactly
these fields:
- "name": short symptom name (string)
- "description": one-sentence description (string)
- "severity": number from 0 to 5
- "location": affected body area or system (string)

Example:
[{{"name": "Fever", "description": "Elevated body temperature.", "severity": 2, "location": "Whole body"}}]

No prose, no markdown, only the JSON array."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_the_disease_and_fields() {
        let prompt = symptom_prompt("influenza");
        assert!(prompt.contains("influenza"));
        for field in ["name", "description", "severity", "location"] {
            assert!(prompt.contains(field));
        }
    }
}
