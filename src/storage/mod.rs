// ============================================================================
// Storage Module
// Arena-based digit buffer allocation with heap and mapped backends
// ============================================================================
//
// This module provides:
// - Arena: capability trait over a backing store
// - HeapArena / MappedArena: the two implementations
// - arena_for / allocate_digits: size-based backend selection
// - DigitBuf: owned buffer with RAII release
// - ArenaStats: process-wide diagnostic counters
//
// Design principles:
// - Call sites never branch on buffer size; the factory does
// - Release is Drop, so a buffer cannot be freed twice or leak its mapping
// - Counters are diagnostic only and use relaxed atomics

mod arena;
mod stats;

pub use arena::{
    allocate_digits, arena_for, Arena, Backend, DigitBuf, HeapArena, MappedArena, MAP_THRESHOLD,
};
pub use stats::{stats, ArenaStats};
