// ============================================================================
// Ternary Engine Library
// Arbitrary-precision ternary arithmetic over packed base-81 digits
// ============================================================================

//! # Ternary Engine
//!
//! An arbitrary-precision integer arithmetic engine for balanced ternary
//! text, storing four trits per base-81 digit.
//!
//! ## Features
//!
//! - **Move-only big integers** with arena-backed digit storage
//! - **Dual storage backends**: heap below 500 KiB, anonymous memory
//!   mapping at and above it, selected transparently
//! - **Karatsuba multiplication** with a schoolbook base case and a small
//!   result cache keyed on canonical operand text
//! - **Derived operations** (factorial, integer exponentiation) with
//!   explicit overflow and negativity policies
//! - **Closed error taxonomy** — every fallible operation reports one
//!   `TritError` kind, no panics
//!
//! ## Example
//!
//! ```rust
//! use ternary_engine::prelude::*;
//!
//! let engine = TritEngine::new();
//!
//! let a: TritInt = "102".parse().unwrap(); // 11
//! let b: TritInt = "10".parse().unwrap();  // 3
//!
//! let sum = a.checked_add(&b).unwrap();
//! assert_eq!(sum.to_string(), "112");      // 14
//!
//! let product = engine.multiply(&a, &b).unwrap();
//! assert_eq!(product.to_string(), "1020"); // 33
//!
//! let cube = engine.power(&b, &a).unwrap();
//! assert_eq!(cube.to_i64().unwrap(), 177_147); // 3^11
//! ```

pub mod engine;
pub mod numeric;
pub mod storage;

// Re-exports for convenience
pub mod prelude {
    pub use crate::engine::{
        EngineConfig, TritEngine, TritEngineBuilder, KARATSUBA_CUTOFF, MAX_FACTORIAL_ARG,
        MAX_POWER_EXPONENT, MUL_CACHE_CAPACITY,
    };
    pub use crate::numeric::{Sign, TritError, TritInt, TritResult, BASE};
    pub use crate::storage::{Backend, MAP_THRESHOLD};
}
