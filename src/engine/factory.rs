// ============================================================================
// Engine Factory
// Fluent construction of configured engines
// ============================================================================

use super::config::EngineConfig;
use super::trit_engine::TritEngine;

/// Builder for creating engines with a fluent API.
///
/// # Example
/// ```
/// use ternary_engine::engine::TritEngineBuilder;
///
/// let engine = TritEngineBuilder::new()
///     .with_karatsuba_cutoff(32)
///     .with_cache_capacity(16)
///     .build()
///     .unwrap();
/// assert_eq!(engine.config().karatsuba_cutoff, 32);
/// ```
pub struct TritEngineBuilder {
    config: EngineConfig,
}

impl TritEngineBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Set the schoolbook/Karatsuba crossover length.
    pub fn with_karatsuba_cutoff(mut self, cutoff: usize) -> Self {
        self.config.karatsuba_cutoff = cutoff;
        self
    }

    /// Set the multiplication cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Build the engine, validating the configuration first.
    pub fn build(self) -> Result<TritEngine, String> {
        TritEngine::with_config(self.config)
    }

    /// Inspect the configuration without building.
    pub fn get_config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for TritEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
