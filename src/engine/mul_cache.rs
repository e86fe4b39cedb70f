// ============================================================================
// Multiplication Cache
// Fixed-capacity result cache keyed on canonical operand text
// ============================================================================

use crate::numeric::{TritInt, TritResult};

/// Default number of cache slots.
pub const MUL_CACHE_CAPACITY: usize = 8;

struct CacheEntry {
    key: String,
    product: TritInt,
}

/// Bounded product cache.
///
/// Keys are `mul:<left-text>:<right-text>` over the canonical ternary text
/// of both operands. Capacity is fixed at construction; a free slot is an
/// unoccupied `Option`.
pub(crate) struct MulCache {
    slots: Vec<Option<CacheEntry>>,
}

impl MulCache {
    pub(crate) fn new(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    /// Canonical cache key for the product of `a` and `b`.
    pub(crate) fn key_for(a: &TritInt, b: &TritInt) -> TritResult<String> {
        Ok(format!(
            "mul:{}:{}",
            a.to_ternary_string()?,
            b.to_ternary_string()?
        ))
    }

    /// A fresh copy of the cached product under `key`, if any.
    pub(crate) fn lookup(&self, key: &str) -> TritResult<Option<TritInt>> {
        for entry in self.slots.iter().flatten() {
            if entry.key == key {
                tracing::trace!(key, "multiplication cache hit");
                return Ok(Some(entry.product.try_clone()?));
            }
        }
        tracing::trace!(key, "multiplication cache miss");
        Ok(None)
    }

    /// Store a copy of `product` under `key`.
    ///
    /// Eviction: the first free slot wins; with every slot occupied, slot 0
    /// is overwritten. This is not LRU — under sustained pressure slot 0
    /// churns while the remaining slots stay pinned to their first
    /// occupants.
    pub(crate) fn store(&mut self, key: String, product: &TritInt) -> TritResult<()> {
        if self.slots.is_empty() {
            return Ok(());
        }
        let slot = self.slots.iter().position(Option::is_none).unwrap_or(0);
        let entry = CacheEntry {
            key,
            product: product.try_clone()?,
        };
        tracing::trace!(key = entry.key.as_str(), slot, "multiplication cache store");
        self.slots[slot] = Some(entry);
        Ok(())
    }
}
