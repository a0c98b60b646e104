//! Cache-or-generate orchestration
//!
//! Composes the admission policy, variant store, schema validator, and
//! external generator. Per request: decide cache-first or generate-first,
//! serve a random retained variant on the cache path, and on the generate
//! path gate storage behind validation so the store only ever holds
//! well-formed artifacts.

use crate::error::{CacheError, Result};
use crate::generate::{symptom_prompt, Generator};
use crate::policy::AdmissionPolicy;
use crate::schema::SchemaValidator;
use crate::store::VariantStore;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Orchestrator for validation-gated, cached generation.
///
/// Stateless across requests: the only shared mutable resource is the store,
/// which serializes its own writes. The generator call is awaited without
/// holding any store lock, and cancelling a request mid-generation means the
/// late response is never validated or stored.
pub struct SymptomOrchestrator<S, G, P> {
    store: S,
    generator: G,
    validator: SchemaValidator,
    policy: P,
    prompt_builder: fn(&str) -> String,
}

impl<S, G, P> SymptomOrchestrator<S, G, P>
where
    S: VariantStore,
    G: Generator,
    P: AdmissionPolicy,
{
    /// Compose an orchestrator for the symptom-report artifact family
    pub fn new(store: S, generator: G, validator: SchemaValidator, policy: P) -> Self {
        Self {
            store,
            generator,
            validator,
            policy,
            prompt_builder: symptom_prompt,
        }
    }

    /// Override prompt construction, e.g. for a different artifact family
    pub fn with_prompt_builder(mut self, prompt_builder: fn(&str) -> String) -> Self {
        self.prompt_builder = prompt_builder;
        self
    }

    /// Serve an artifact for `key`, from cache or freshly generated.
    ///
    /// The key is normalized (trimmed, lower-cased) before any store
    /// interaction, so `"Flu "` and `"flu"` share one variant bucket.
    pub async fn fetch(&self, key: &str) -> Result<Value> {
        let key = normalize_key(key);

        if self.policy.serve_from_cache() {
            let mut variants = self.store.get(&key)?;
            if !variants.is_empty() {
                // Previously-validated artifacts only; no re-validation on
                // cache reads.
                let index = self.policy.pick_variant(variants.len());
                if index < variants.len() {
                    debug!(key = %key, index, total = variants.len(), "serving cached variant");
                    return Ok(variants.swap_remove(index));
                }
            }
            debug!(key = %key, "cache empty, falling through to generation");
        }

        self.generate_and_store(&key).await
    }

    async fn generate_and_store(&self, key: &str) -> Result<Value> {
        let prompt = (self.prompt_builder)(key);

        info!(key = %key, "generating new artifact");
        let raw = self.generator.generate(&prompt).await?;

        let artifact: Value = serde_json::from_str(&raw).map_err(|e| {
            warn!(key = %key, error = %e, "generator output is not valid JSON");
            CacheError::GenerationFormat(e.to_string())
        })?;

        let report = self.validator.validate(&artifact);
        if !report.is_valid() {
            warn!(
                key = %key,
                violations = report.errors().len(),
                "rejecting generated artifact"
            );
            return Err(CacheError::Validation(report));
        }

        self.store.put(key, &artifact)?;
        info!(key = %key, "stored newly generated variant");

        Ok(artifact)
    }
}

/// Normalize a semantic key into its canonical bucket form
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Common Cold "), "common cold");
        assert_eq!(normalize_key("FLU"), "flu");
        assert_eq!(normalize_key("flu"), "flu");
    }
}
