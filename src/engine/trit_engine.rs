// ============================================================================
// Trit Engine
// Cache-fronted multiplication and the derived operations built on it
// ============================================================================

use super::config::EngineConfig;
use super::karatsuba;
use super::mul_cache::MulCache;
use crate::numeric::{TritError, TritInt, TritResult};
use parking_lot::Mutex;

/// Largest argument `factorial` accepts; 20! is the largest factorial the
/// native accumulator holds before re-encoding into base-81.
pub const MAX_FACTORIAL_ARG: i64 = 20;

/// Largest exponent `power` accepts.
pub const MAX_POWER_EXPONENT: i64 = 1000;

/// Arithmetic engine owning the multiplication result cache.
///
/// Addition, subtraction and the codec live on [`TritInt`] itself; the
/// engine fronts the operations that share state — cached multiplication
/// and the derived operations built from it. The cache sits behind a mutex,
/// so one engine can serve multiple threads.
pub struct TritEngine {
    config: EngineConfig,
    cache: Mutex<MulCache>,
}

impl TritEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        let config = EngineConfig::default();
        let cache = Mutex::new(MulCache::new(config.cache_capacity));
        Self { config, cache }
    }

    /// Create an engine from an explicit configuration.
    ///
    /// # Errors
    /// Returns the validation message if the configuration is rejected.
    pub fn with_config(config: EngineConfig) -> Result<Self, String> {
        config.validate()?;
        let cache = Mutex::new(MulCache::new(config.cache_capacity));
        Ok(Self { config, cache })
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Multiplication
    // ========================================================================

    /// Cache-fronted signed multiply.
    ///
    /// On a key hit the cached product is copied out; on a miss the product
    /// is computed via Karatsuba and a copy is stored under the key. Either
    /// way the caller owns a value equal to the fresh computation.
    ///
    /// # Errors
    /// `MemoryAlloc` or `MapFailed` if a buffer cannot be obtained.
    pub fn multiply(&self, a: &TritInt, b: &TritInt) -> TritResult<TritInt> {
        let key = MulCache::key_for(a, b)?;
        if let Some(hit) = self.cache.lock().lookup(&key)? {
            return Ok(hit);
        }
        let product = karatsuba::multiply(a, b, self.config.karatsuba_cutoff)?;
        self.cache.lock().store(key, &product)?;
        Ok(product)
    }

    // ========================================================================
    // Derived Operations
    // ========================================================================

    /// Factorial of a non-negative value.
    ///
    /// # Errors
    /// - `Negative` if `a` is negative.
    /// - `Overflow` if `a` exceeds [`MAX_FACTORIAL_ARG`] or does not convert
    ///   to a native integer at all.
    pub fn factorial(&self, a: &TritInt) -> TritResult<TritInt> {
        if a.sign().is_negative() {
            return Err(TritError::Negative);
        }
        let v = a.to_i64()?;
        if v > MAX_FACTORIAL_ARG {
            return Err(TritError::Overflow);
        }
        let mut acc: i64 = 1;
        for i in 2..=v {
            acc *= i;
        }
        TritInt::from_i64(acc)
    }

    /// `base` raised to a non-negative exponent by repeated cached
    /// multiplication starting from one.
    ///
    /// The result is negative exactly when `base` is negative and the
    /// exponent odd; that falls out of the per-multiplication sign rule.
    ///
    /// # Errors
    /// - `Negative` if the exponent is negative.
    /// - `Overflow` if the exponent exceeds [`MAX_POWER_EXPONENT`] or does
    ///   not convert to a native integer at all.
    pub fn power(&self, base: &TritInt, exponent: &TritInt) -> TritResult<TritInt> {
        if exponent.sign().is_negative() {
            return Err(TritError::Negative);
        }
        let e = exponent.to_i64()?;
        if e > MAX_POWER_EXPONENT {
            return Err(TritError::Overflow);
        }
        let mut acc = TritInt::one()?;
        for _ in 0..e {
            acc = self.multiply(&acc, base)?;
        }
        Ok(acc)
    }
}

impl Default for TritEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
