// ============================================================================
// Arena Statistics
// Process-wide diagnostic counters for mapped digit storage
// ============================================================================

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Diagnostic counters maintained by the storage arenas.
///
/// These track total mapped bytes and a monotonic map/unmap step counter.
/// They exist for observation only (status displays, tests, logging) and are
/// never consulted for correctness; relaxed atomics are sufficient.
#[derive(Debug)]
pub struct ArenaStats {
    mapped_bytes: AtomicI64,
    operation_steps: AtomicU64,
}

impl ArenaStats {
    const fn new() -> Self {
        Self {
            mapped_bytes: AtomicI64::new(0),
            operation_steps: AtomicU64::new(0),
        }
    }

    /// Total bytes currently backed by memory mappings.
    #[inline]
    pub fn mapped_bytes(&self) -> i64 {
        self.mapped_bytes.load(Ordering::Relaxed)
    }

    /// Number of map/unmap operations performed so far.
    #[inline]
    pub fn operation_steps(&self) -> u64 {
        self.operation_steps.load(Ordering::Relaxed)
    }

    pub(crate) fn record_map(&self, bytes: usize) {
        self.mapped_bytes.fetch_add(bytes as i64, Ordering::Relaxed);
        self.operation_steps.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unmap(&self, bytes: usize) {
        self.mapped_bytes.fetch_sub(bytes as i64, Ordering::Relaxed);
        self.operation_steps.fetch_add(1, Ordering::Relaxed);
    }
}

static STATS: ArenaStats = ArenaStats::new();

/// The process-wide arena statistics.
#[inline]
pub fn stats() -> &'static ArenaStats {
    &STATS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_unmap_balance() {
        let before_bytes = stats().mapped_bytes();
        let before_steps = stats().operation_steps();

        stats().record_map(4096);
        assert_eq!(stats().mapped_bytes(), before_bytes + 4096);

        stats().record_unmap(4096);
        assert_eq!(stats().mapped_bytes(), before_bytes);
        assert_eq!(stats().operation_steps(), before_steps + 2);
    }
}
