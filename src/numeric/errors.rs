// ============================================================================
// Numeric Errors
// Error taxonomy for ternary big-integer operations
// ============================================================================

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur during ternary arithmetic operations.
///
/// The set is closed: every fallible operation in the crate reports exactly
/// one of these kinds. Some variants (`DivisionByZero`, `Undefined`,
/// `PrecisionLimit`, `Script`) are produced only by embedding front ends
/// built on top of the engine, but they are part of the shared taxonomy and
/// keep stable identifiers (see [`TritError::code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TritError {
    /// Heap allocation for a digit buffer failed
    MemoryAlloc,
    /// Input text is not a valid ternary number
    InvalidInput,
    /// Attempted division by zero
    DivisionByZero,
    /// Result exceeds the representable or permitted range
    Overflow,
    /// Operation is not defined for the given operand
    Undefined,
    /// Operand must be non-negative
    Negative,
    /// Requested precision is outside the supported range
    PrecisionLimit,
    /// Memory-mapped allocation for a digit buffer failed
    MapFailed,
    /// Script execution failed in an embedding front end
    Script,
}

impl TritError {
    /// Stable numeric identifier for this error kind.
    ///
    /// Embedding front ends key on these codes; they must not be renumbered.
    pub const fn code(self) -> u8 {
        match self {
            TritError::MemoryAlloc => 1,
            TritError::InvalidInput => 2,
            TritError::DivisionByZero => 3,
            TritError::Overflow => 4,
            TritError::Undefined => 5,
            TritError::Negative => 6,
            TritError::PrecisionLimit => 7,
            TritError::MapFailed => 8,
            TritError::Script => 9,
        }
    }
}

impl fmt::Display for TritError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TritError::MemoryAlloc => write!(f, "memory allocation failed"),
            TritError::InvalidInput => write!(f, "invalid input: not a ternary number"),
            TritError::DivisionByZero => write!(f, "division by zero"),
            TritError::Overflow => write!(f, "overflow: result outside permitted range"),
            TritError::Undefined => write!(f, "operation undefined"),
            TritError::Negative => write!(f, "negative input not permitted"),
            TritError::PrecisionLimit => write!(f, "precision limit exceeded"),
            TritError::MapFailed => write!(f, "memory mapping failed"),
            TritError::Script => write!(f, "scripting error"),
        }
    }
}

impl std::error::Error for TritError {}

/// Result type alias for ternary arithmetic operations
pub type TritResult<T> = Result<T, TritError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            TritError::MemoryAlloc.to_string(),
            "memory allocation failed"
        );
        assert_eq!(TritError::DivisionByZero.to_string(), "division by zero");
        assert_eq!(
            TritError::Overflow.to_string(),
            "overflow: result outside permitted range"
        );
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(TritError::MemoryAlloc.code(), 1);
        assert_eq!(TritError::InvalidInput.code(), 2);
        assert_eq!(TritError::DivisionByZero.code(), 3);
        assert_eq!(TritError::Overflow.code(), 4);
        assert_eq!(TritError::Undefined.code(), 5);
        assert_eq!(TritError::Negative.code(), 6);
        assert_eq!(TritError::PrecisionLimit.code(), 7);
        assert_eq!(TritError::MapFailed.code(), 8);
        assert_eq!(TritError::Script.code(), 9);
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(TritError::Overflow, TritError::Overflow);
        assert_ne!(TritError::Overflow, TritError::Negative);
    }
}
