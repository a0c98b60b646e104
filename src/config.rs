//! Configuration for the cache pipeline

use crate::error::{CacheError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of variants retained per key
pub const DEFAULT_RETENTION_LIMIT: usize = 10;

/// Configuration consumed by the cache pipeline.
///
/// The admission probability has no default on purpose: deployments have
/// wanted anything from "almost always cache" to "almost always regenerate",
/// so the value must be stated explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Probability (0.0 - 1.0) that a request attempts the cache path
    /// before considering generation
    pub admission_probability: f64,

    /// Maximum number of distinct-content variants kept per key
    pub retention_limit: usize,

    /// SQLite database location
    pub db_path: PathBuf,
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.admission_probability) {
            return Err(CacheError::Config(format!(
                "admission_probability must be between 0.0 and 1.0, got {}",
                self.admission_probability
            )));
        }

        if self.retention_limit == 0 {
            return Err(CacheError::Config(
                "retention_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for cache configuration with validation
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    admission_probability: Option<f64>,
    retention_limit: Option<usize>,
    db_path: Option<PathBuf>,
}

impl CacheConfigBuilder {
    /// Set the cache admission probability (required)
    pub fn admission_probability(mut self, p: f64) -> Self {
        self.admission_probability = Some(p);
        self
    }

    /// Set the per-key retention limit
    pub fn retention_limit(mut self, limit: usize) -> Self {
        self.retention_limit = Some(limit);
        self
    }

    /// Set the SQLite database location
    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<CacheConfig> {
        let admission_probability = self.admission_probability.ok_or_else(|| {
            CacheError::Config("admission_probability must be set".to_string())
        })?;

        let config = CacheConfig {
            admission_probability,
            retention_limit: self.retention_limit.unwrap_or(DEFAULT_RETENTION_LIMIT),
            db_path: self
                .db_path
                .unwrap_or_else(|| PathBuf::from("symptom_cache.db")),
        };

        config.validate()?;
        Ok(config)
    }
}
