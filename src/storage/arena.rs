// ============================================================================
// Storage Arenas
// Heap and memory-mapped backing stores for digit buffers
// ============================================================================

use super::stats::stats;
use crate::numeric::{TritError, TritResult};
use memmap2::MmapMut;
use std::fs::File;
use std::ops::{Deref, DerefMut};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Byte size at which digit buffers move from the heap to a memory mapping.
///
/// Buffers strictly below this are heap-allocated; buffers at or above it are
/// backed by an anonymous mapping. Both backends produce identical observable
/// arithmetic; only the resource management differs.
pub const MAP_THRESHOLD: usize = 500 * 1024;

/// Identifies which arena produced a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Backend {
    /// General heap allocation
    Heap,
    /// Anonymous memory mapping via an unlinked temporary file
    Mapped,
}

// ============================================================================
// Digit Buffer
// ============================================================================

/// An owned, zero-initialized byte buffer holding base-81 digits.
///
/// The buffer knows its own backing store and releases it on drop: a heap
/// buffer frees normally, a mapped buffer unmaps and closes its descriptor.
/// Exclusive ownership is enforced by the type system — a `DigitBuf` can be
/// moved but never aliased by two live owners, so double release is
/// impossible by construction.
pub enum DigitBuf {
    /// Heap-backed digits
    Heap(Box<[u8]>),
    /// Mapping plus the descriptor it must keep alive until release
    Mapped { map: MmapMut, file: File },
}

impl DigitBuf {
    /// Number of bytes in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            DigitBuf::Heap(b) => b.len(),
            DigitBuf::Mapped { map, .. } => map.len(),
        }
    }

    /// True if the buffer holds no bytes. Never the case for arena-produced
    /// buffers, which are at least one byte long.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Which arena produced this buffer.
    #[inline]
    pub fn backend(&self) -> Backend {
        match self {
            DigitBuf::Heap(_) => Backend::Heap,
            DigitBuf::Mapped { .. } => Backend::Mapped,
        }
    }
}

impl Deref for DigitBuf {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        match self {
            DigitBuf::Heap(b) => b,
            DigitBuf::Mapped { map, .. } => map,
        }
    }
}

impl DerefMut for DigitBuf {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        match self {
            DigitBuf::Heap(b) => b,
            DigitBuf::Mapped { map, .. } => map,
        }
    }
}

impl Drop for DigitBuf {
    fn drop(&mut self) {
        if let DigitBuf::Mapped { map, .. } = self {
            let bytes = map.len();
            stats().record_unmap(bytes);
            tracing::debug!(
                bytes,
                total_mapped = stats().mapped_bytes(),
                "unmapped digit buffer"
            );
        }
    }
}

impl std::fmt::Debug for DigitBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitBuf")
            .field("backend", &self.backend())
            .field("len", &self.len())
            .finish()
    }
}

// ============================================================================
// Arena Trait and Implementations
// ============================================================================

/// Capability interface over a backing store for digit buffers.
///
/// Implementations produce zero-initialized buffers; release is handled by
/// [`DigitBuf`]'s drop, so an arena has no explicit free operation.
pub trait Arena {
    /// Allocate a zero-initialized buffer of `max(bytes, 1)` bytes.
    ///
    /// # Errors
    /// `MemoryAlloc` if the heap reservation fails, `MapFailed` if any step
    /// of creating the mapping fails.
    fn allocate(&self, bytes: usize) -> TritResult<DigitBuf>;
}

/// Arena drawing from the general heap.
pub struct HeapArena;

impl Arena for HeapArena {
    fn allocate(&self, bytes: usize) -> TritResult<DigitBuf> {
        let bytes = bytes.max(1);
        let mut buf = Vec::new();
        buf.try_reserve_exact(bytes)
            .map_err(|_| TritError::MemoryAlloc)?;
        buf.resize(bytes, 0u8);
        Ok(DigitBuf::Heap(buf.into_boxed_slice()))
    }
}

/// Arena backing buffers with an anonymous memory mapping.
///
/// The mapping is realized through a uniquely-named temporary file that is
/// unlinked before use, so no filesystem artifact persists; the file is
/// truncated to the requested size and mapped read/write. The descriptor
/// stays open for the lifetime of the buffer and closes on release.
pub struct MappedArena;

impl Arena for MappedArena {
    fn allocate(&self, bytes: usize) -> TritResult<DigitBuf> {
        let bytes = bytes.max(1);
        let file = tempfile::tempfile().map_err(|_| TritError::MapFailed)?;
        file.set_len(bytes as u64).map_err(|_| TritError::MapFailed)?;
        // Safety: the file is freshly created, unlinked, and exclusively
        // owned by this buffer, so no other mapping or writer can exist.
        let map = unsafe { MmapMut::map_mut(&file) }.map_err(|_| TritError::MapFailed)?;
        stats().record_map(bytes);
        tracing::debug!(
            bytes,
            total_mapped = stats().mapped_bytes(),
            "mapped digit buffer"
        );
        Ok(DigitBuf::Mapped { map, file })
    }
}

// ============================================================================
// Backend Selection
// ============================================================================

/// Select the arena responsible for a buffer of the given byte size.
#[inline]
pub fn arena_for(bytes: usize) -> &'static dyn Arena {
    if bytes.max(1) < MAP_THRESHOLD {
        &HeapArena
    } else {
        &MappedArena
    }
}

/// Allocate a zero-initialized digit buffer of `max(len, 1)` bytes from
/// whichever arena the size selects.
#[inline]
pub fn allocate_digits(len: usize) -> TritResult<DigitBuf> {
    arena_for(len).allocate(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_buffers_come_from_heap() {
        let buf = allocate_digits(64).unwrap();
        assert_eq!(buf.backend(), Backend::Heap);
        assert_eq!(buf.len(), 64);
        assert!(buf.iter().all(|&d| d == 0));
    }

    #[test]
    fn test_zero_length_rounds_up_to_one_byte() {
        let buf = allocate_digits(0).unwrap();
        assert_eq!(buf.len(), 1);
        assert_eq!(buf.backend(), Backend::Heap);
    }

    #[test]
    fn test_threshold_selects_mapped_backend() {
        let below = allocate_digits(MAP_THRESHOLD - 1).unwrap();
        assert_eq!(below.backend(), Backend::Heap);

        let at = allocate_digits(MAP_THRESHOLD).unwrap();
        assert_eq!(at.backend(), Backend::Mapped);
        assert_eq!(at.len(), MAP_THRESHOLD);
        assert!(at.iter().all(|&d| d == 0));
    }

    #[test]
    fn test_mapped_buffer_is_writable_and_tracked() {
        let steps_before = stats().operation_steps();
        let mut buf = MappedArena.allocate(MAP_THRESHOLD).unwrap();
        buf[0] = 80;
        buf[MAP_THRESHOLD - 1] = 3;
        assert_eq!(buf[0], 80);
        assert!(stats().mapped_bytes() >= MAP_THRESHOLD as i64);

        drop(buf);
        assert!(stats().operation_steps() >= steps_before + 2);
    }
}
