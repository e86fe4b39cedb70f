// ============================================================================
// Engine Configuration
// Tuning knobs for the multiplication engine
// ============================================================================

use super::karatsuba::KARATSUBA_CUTOFF;
use super::mul_cache::MUL_CACHE_CAPACITY;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`TritEngine`](super::TritEngine).
///
/// The storage threshold that moves digit buffers to the mapped backend is
/// deliberately not configurable: it selects a different code path with
/// identical observable results and is pinned by
/// [`MAP_THRESHOLD`](crate::storage::MAP_THRESHOLD).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Operand digit length at or below which multiplication stays
    /// schoolbook
    pub karatsuba_cutoff: usize,

    /// Number of slots in the multiplication result cache
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            karatsuba_cutoff: KARATSUBA_CUTOFF,
            cache_capacity: MUL_CACHE_CAPACITY,
        }
    }
}

impl EngineConfig {
    /// Builder method: set the schoolbook/Karatsuba crossover length.
    pub fn with_karatsuba_cutoff(mut self, cutoff: usize) -> Self {
        self.karatsuba_cutoff = cutoff;
        self
    }

    /// Builder method: set the multiplication cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.karatsuba_cutoff == 0 {
            return Err("Karatsuba cutoff must be at least 1".to_string());
        }
        if self.cache_capacity == 0 {
            return Err("Cache capacity must be at least 1".to_string());
        }
        Ok(())
    }
}
