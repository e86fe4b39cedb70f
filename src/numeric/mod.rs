// ============================================================================
// Numeric Module
// Signed arbitrary-precision ternary integers over base-81 digits
// ============================================================================
//
// This module provides:
// - TritInt: move-only big integer with arena-backed digit storage
// - Sign: explicit sign flag (zero always positive)
// - The ternary text codec (FromStr / Display)
// - TritError / TritResult: the closed error taxonomy
//
// Design principles:
// - No floating point; digits are u8 values in [0, 80]
// - All fallible operations return TritResult (no panics)
// - Exclusive ownership: duplication is the explicit try_clone

mod big_int;
mod codec;
mod errors;

pub use big_int::{Sign, TritInt, BASE};
pub use errors::{TritError, TritResult};
