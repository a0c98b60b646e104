//! # symptom-cache
//!
//! A validation-gated, content-addressed cache sitting between an unreliable
//! external generator (an LLM producing structured symptom records) and
//! callers that want well-formed, bounded, reasonably fresh data without
//! paying the generation cost on every request.
//!
//! ## How a request flows
//!
//! 1. The [`AdmissionPolicy`] draws whether to try the cache first
//!    (probability *p*) or go straight to generation.
//! 2. Cache path: all retained variants for the normalized key are fetched
//!    from the [`VariantStore`] and one is served uniformly at random. Cache
//!    reads are never re-validated; only validated artifacts are ever stored.
//! 3. Generate path: the [`Generator`] is invoked, its raw text parsed as
//!    JSON and checked by the [`SchemaValidator`]. Valid artifacts are
//!    written to the store (content-hash deduplicated, at most L variants
//!    retained per key, oldest evicted first) and returned; anything else is
//!    surfaced as a typed [`CacheError`] and nothing is stored.
//!
//! ## Example
//!
//! ```no_run
//! use symptom_cache::{
//!     CacheConfig, GeminiClient, RandomAdmission, SchemaValidator, SqliteStore,
//!     SymptomOrchestrator,
//! };
//! use symptom_cache::schema::presets;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = CacheConfig::builder()
//!         .admission_probability(0.8)
//!         .retention_limit(10)
//!         .db_path("symptom_cache.db")
//!         .build()?;
//!
//!     let store = SqliteStore::open(&config.db_path, config.retention_limit)?;
//!     let generator = GeminiClient::from_env("gemini-1.5-flash")?;
//!     let validator = SchemaValidator::new(presets::symptom_report());
//!     let policy = RandomAdmission::new(config.admission_probability);
//!
//!     let orchestrator = SymptomOrchestrator::new(store, generator, validator, policy);
//!     let report = orchestrator.fetch("Influenza").await?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod generate;
pub mod orchestrator;
pub mod policy;
pub mod schema;
pub mod store;

// Re-export main types for convenience
pub use config::{CacheConfig, CacheConfigBuilder, DEFAULT_RETENTION_LIMIT};
pub use error::{CacheError, Result};
pub use generate::{GeminiClient, Generator};
pub use orchestrator::{normalize_key, SymptomOrchestrator};
pub use policy::{AdmissionPolicy, RandomAdmission};
pub use schema::{Schema, SchemaValidator, ValidationReport};
pub use store::{CacheEntry, MemoryStore, SqliteStore, VariantStore};
