// ============================================================================
// Ternary Big Integer
// Signed arbitrary-precision integer over packed base-81 digits
// ============================================================================

use super::errors::{TritError, TritResult};
use crate::storage::{allocate_digits, Backend, DigitBuf};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::ops::Neg;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numeric base of one packed digit: four trits, 3^4 = 81.
pub const BASE: u32 = 81;

// ============================================================================
// Sign
// ============================================================================

/// Sign of a [`TritInt`]. The value zero is always stored as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// The opposite sign.
    #[inline]
    pub const fn flipped(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        matches!(self, Sign::Negative)
    }
}

// ============================================================================
// TritInt
// ============================================================================

/// Signed arbitrary-precision ternary integer.
///
/// Digits are base-81 values in `[0, 80]` (four trits packed per byte),
/// stored least-significant first in an arena-allocated [`DigitBuf`]. The
/// buffer may be longer than the logical digit count — normalization trims
/// the count, never reallocates.
///
/// # Invariants
/// - No most-significant zero digit, except the value zero itself, which is
///   exactly one `0` digit with positive sign.
/// - Every digit is in `[0, 80]` after every operation.
///
/// # Ownership
/// `TritInt` is move-only and deliberately does not implement `Clone`:
/// duplicating a value means duplicating its digit buffer, which can fail,
/// so it is the explicit [`try_clone`](TritInt::try_clone). Two live owners
/// of one buffer cannot exist, and release is handled by `Drop`.
pub struct TritInt {
    sign: Sign,
    digits: DigitBuf,
    len: usize,
}

impl TritInt {
    // ========================================================================
    // Construction
    // ========================================================================

    /// The value zero: one digit, positive sign.
    pub fn zero() -> TritResult<Self> {
        let digits = allocate_digits(1)?;
        Ok(Self {
            sign: Sign::Positive,
            digits,
            len: 1,
        })
    }

    /// The value one.
    pub fn one() -> TritResult<Self> {
        let mut digits = allocate_digits(1)?;
        digits[0] = 1;
        Ok(Self {
            sign: Sign::Positive,
            digits,
            len: 1,
        })
    }

    /// Construct from raw little-endian base-81 digits.
    ///
    /// An empty slice is the value zero. The result is normalized.
    ///
    /// # Errors
    /// `InvalidInput` if any digit is outside `[0, 80]`.
    pub fn from_base81_digits(sign: Sign, digits: &[u8]) -> TritResult<Self> {
        if digits.iter().any(|&d| d as u32 >= BASE) {
            return Err(TritError::InvalidInput);
        }
        if digits.is_empty() {
            return Self::zero();
        }
        let mut buf = allocate_digits(digits.len())?;
        buf[..digits.len()].copy_from_slice(digits);
        Ok(Self::from_buf(sign, buf, digits.len()))
    }

    /// Re-encode a native integer into base-81 digits.
    pub fn from_i64(value: i64) -> TritResult<Self> {
        let sign = if value < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        // Magnitude in 128 bits so i64::MIN survives the negation.
        let mut magnitude = (value as i128).unsigned_abs();
        let mut scratch: SmallVec<[u8; 16]> = SmallVec::new();
        while magnitude > 0 {
            scratch.push((magnitude % BASE as u128) as u8);
            magnitude /= BASE as u128;
        }
        Self::from_base81_digits(sign, &scratch)
    }

    /// Takes ownership of an arena buffer and normalizes.
    pub(crate) fn from_buf(sign: Sign, digits: DigitBuf, len: usize) -> Self {
        debug_assert!(len >= 1 && len <= digits.len());
        let mut out = Self { sign, digits, len };
        out.normalize();
        out
    }

    /// Duplicate this value into a freshly allocated buffer.
    ///
    /// # Errors
    /// `MemoryAlloc` or `MapFailed` if the new buffer cannot be obtained.
    pub fn try_clone(&self) -> TritResult<Self> {
        let mut buf = allocate_digits(self.len)?;
        buf[..self.len].copy_from_slice(self.digits());
        Ok(Self {
            sign: self.sign,
            digits: buf,
            len: self.len,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The logical digits, least significant first.
    #[inline]
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    /// Number of logical base-81 digits.
    #[inline]
    pub fn digit_count(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.len == 1 && self.digits[0] == 0
    }

    /// Which storage backend holds this value's digits.
    #[inline]
    pub fn backend(&self) -> Backend {
        self.digits.backend()
    }

    /// Convert to a native integer.
    ///
    /// # Errors
    /// `Overflow` if the magnitude exceeds `i64::MAX`.
    pub fn to_i64(&self) -> TritResult<i64> {
        let mut acc: i64 = 0;
        for &d in self.digits().iter().rev() {
            acc = acc
                .checked_mul(BASE as i64)
                .and_then(|v| v.checked_add(d as i64))
                .ok_or(TritError::Overflow)?;
        }
        Ok(if self.sign.is_negative() { -acc } else { acc })
    }

    // ========================================================================
    // Normalization
    // ========================================================================

    /// Trim most-significant zero digits down to the canonical form.
    pub(crate) fn normalize(&mut self) {
        while self.len > 1 && self.digits[self.len - 1] == 0 {
            self.len -= 1;
        }
        if self.is_zero() {
            self.sign = Sign::Positive;
        }
    }

    pub(crate) fn set_sign(&mut self, sign: Sign) {
        self.sign = sign;
        if self.is_zero() {
            self.sign = Sign::Positive;
        }
    }

    /// Mutable view of the logical digits.
    pub(crate) fn digits_mut(&mut self) -> &mut [u8] {
        &mut self.digits[..self.len]
    }

    /// Extend the logical length by one zeroed digit, reallocating if the
    /// buffer is exhausted.
    pub(crate) fn grow_one(&mut self) -> TritResult<()> {
        if self.len < self.digits.len() {
            self.len += 1;
            self.digits[self.len - 1] = 0;
            return Ok(());
        }
        let mut buf = allocate_digits(self.len + 1)?;
        buf[..self.len].copy_from_slice(&self.digits[..self.len]);
        self.digits = buf;
        self.len += 1;
        Ok(())
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Compare absolute values, ignoring high-order zero padding on either
    /// side.
    pub fn compare_magnitude(&self, other: &TritInt) -> Ordering {
        let a = self.digits();
        let b = other.digits();
        if a.len() > b.len() && a[b.len()..].iter().any(|&d| d != 0) {
            return Ordering::Greater;
        }
        if b.len() > a.len() && b[a.len()..].iter().any(|&d| d != 0) {
            return Ordering::Less;
        }
        let common = a.len().min(b.len());
        for i in (0..common).rev() {
            match a[i].cmp(&b[i]) {
                Ordering::Equal => {}
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }

    // ========================================================================
    // Addition and Subtraction
    // ========================================================================

    /// Signed addition.
    ///
    /// # Errors
    /// `MemoryAlloc` or `MapFailed` if the result buffer cannot be obtained.
    pub fn checked_add(&self, rhs: &TritInt) -> TritResult<TritInt> {
        self.add_with_sign(rhs, rhs.sign)
    }

    /// Signed subtraction, `self - rhs`.
    ///
    /// Implemented as addition against `rhs` with a flipped copy of its sign
    /// flag; `rhs` itself is never mutated.
    pub fn checked_sub(&self, rhs: &TritInt) -> TritResult<TritInt> {
        self.add_with_sign(rhs, rhs.sign.flipped())
    }

    fn add_with_sign(&self, rhs: &TritInt, rhs_sign: Sign) -> TritResult<TritInt> {
        if self.sign == rhs_sign {
            // Same sign: add magnitudes under that sign.
            let len = self.len.max(rhs.len) + 1;
            let mut buf = allocate_digits(len)?;
            buf[..self.len].copy_from_slice(self.digits());
            for (i, &d) in rhs.digits().iter().enumerate() {
                let mut carry = d as u32;
                let mut pos = i;
                while carry > 0 {
                    let v = buf[pos] as u32 + carry;
                    buf[pos] = (v % BASE) as u8;
                    carry = v / BASE;
                    pos += 1;
                }
            }
            return Ok(TritInt::from_buf(self.sign, buf, len));
        }
        // Different sign: subtract the smaller magnitude from the larger,
        // the result taking the larger operand's effective sign.
        match self.compare_magnitude(rhs) {
            Ordering::Equal => TritInt::zero(),
            Ordering::Greater => Self::sub_magnitudes(self.sign, self.digits(), rhs.digits()),
            Ordering::Less => Self::sub_magnitudes(rhs_sign, rhs.digits(), self.digits()),
        }
    }

    /// `larger - smaller` over digit arrays, `larger` strictly greater in
    /// magnitude.
    fn sub_magnitudes(sign: Sign, larger: &[u8], smaller: &[u8]) -> TritResult<TritInt> {
        let len = larger.len();
        let mut buf = allocate_digits(len)?;
        buf[..len].copy_from_slice(larger);
        for i in 0..smaller.len() {
            let mut diff = buf[i] as i32 - smaller[i] as i32;
            if diff < 0 {
                diff += BASE as i32;
                // Borrow from the next nonzero digit; one exists because the
                // larger operand dominates.
                let mut j = i + 1;
                while buf[j] == 0 {
                    buf[j] = (BASE - 1) as u8;
                    j += 1;
                }
                buf[j] -= 1;
            }
            buf[i] = diff as u8;
        }
        Ok(TritInt::from_buf(sign, buf, len))
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl Neg for TritInt {
    type Output = TritInt;

    /// Negation by move: flips the sign flag, zero staying positive. The
    /// digit buffer is reused, not copied.
    fn neg(mut self) -> TritInt {
        if !self.is_zero() {
            self.sign = self.sign.flipped();
        }
        self
    }
}

impl PartialEq for TritInt {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.digits() == other.digits()
    }
}

impl Eq for TritInt {}

impl PartialOrd for TritInt {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TritInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::Positive, Sign::Negative) => Ordering::Greater,
            (Sign::Negative, Sign::Positive) => Ordering::Less,
            (Sign::Positive, Sign::Positive) => self.compare_magnitude(other),
            (Sign::Negative, Sign::Negative) => other.compare_magnitude(self),
        }
    }
}

impl Hash for TritInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sign.hash(state);
        self.digits().hash(state);
    }
}

impl std::fmt::Debug for TritInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TritInt")
            .field("sign", &self.sign)
            .field("digits", &self.digits())
            .field("backend", &self.backend())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_canonical() {
        let z = TritInt::zero().unwrap();
        assert!(z.is_zero());
        assert_eq!(z.sign(), Sign::Positive);
        assert_eq!(z.digits(), &[0]);
    }

    #[test]
    fn test_from_base81_normalizes() {
        let x = TritInt::from_base81_digits(Sign::Positive, &[5, 2, 0, 0]).unwrap();
        assert_eq!(x.digits(), &[5, 2]);

        // All-zero digits collapse to canonical zero, sign dropped.
        let z = TritInt::from_base81_digits(Sign::Negative, &[0, 0, 0]).unwrap();
        assert!(z.is_zero());
        assert_eq!(z.sign(), Sign::Positive);
    }

    #[test]
    fn test_from_base81_rejects_out_of_range() {
        assert_eq!(
            TritInt::from_base81_digits(Sign::Positive, &[3, 81]),
            Err(TritError::InvalidInput)
        );
    }

    #[test]
    fn test_i64_round_trip() {
        for v in [0i64, 1, -1, 80, 81, 6560, -6561, 42_000_000_007, i64::MAX] {
            let x = TritInt::from_i64(v).unwrap();
            assert_eq!(x.to_i64().unwrap(), v, "round trip of {v}");
        }
    }

    #[test]
    fn test_i64_min_magnitude() {
        let x = TritInt::from_i64(i64::MIN).unwrap();
        assert_eq!(x.sign(), Sign::Negative);
        // 2^63 does not fit a positive i64 accumulator.
        assert_eq!(x.to_i64(), Err(TritError::Overflow));
    }

    #[test]
    fn test_to_i64_overflow() {
        // 81^11 > i64::MAX
        let mut digits = vec![0u8; 12];
        digits[11] = 1;
        let x = TritInt::from_base81_digits(Sign::Positive, &digits).unwrap();
        assert_eq!(x.to_i64(), Err(TritError::Overflow));
    }

    #[test]
    fn test_add_same_sign_with_carry() {
        let a = TritInt::from_i64(80).unwrap();
        let b = TritInt::from_i64(1).unwrap();
        let c = a.checked_add(&b).unwrap();
        assert_eq!(c.digits(), &[0, 1]);
        assert_eq!(c.to_i64().unwrap(), 81);
    }

    #[test]
    fn test_add_negative_pair() {
        let a = TritInt::from_i64(-40).unwrap();
        let b = TritInt::from_i64(-50).unwrap();
        assert_eq!(a.checked_add(&b).unwrap().to_i64().unwrap(), -90);
    }

    #[test]
    fn test_add_opposite_signs() {
        let a = TritInt::from_i64(100).unwrap();
        let b = TritInt::from_i64(-30).unwrap();
        assert_eq!(a.checked_add(&b).unwrap().to_i64().unwrap(), 70);
        assert_eq!(b.checked_add(&a).unwrap().to_i64().unwrap(), 70);

        let c = TritInt::from_i64(-100).unwrap();
        let d = TritInt::from_i64(30).unwrap();
        assert_eq!(c.checked_add(&d).unwrap().to_i64().unwrap(), -70);
    }

    #[test]
    fn test_additive_inverse_is_canonical_zero() {
        let x = TritInt::from_i64(123_456).unwrap();
        let neg = TritInt::from_i64(-123_456).unwrap();
        let z = x.checked_add(&neg).unwrap();
        assert!(z.is_zero());
        assert_eq!(z.sign(), Sign::Positive);
    }

    #[test]
    fn test_sub_with_borrow_chain() {
        // 81^3 - 1 exercises borrows rippling through zero digits.
        let a = TritInt::from_base81_digits(Sign::Positive, &[0, 0, 0, 1]).unwrap();
        let b = TritInt::from_i64(1).unwrap();
        let c = a.checked_sub(&b).unwrap();
        assert_eq!(c.digits(), &[80, 80, 80]);
        assert_eq!(c.to_i64().unwrap(), 81i64.pow(3) - 1);
    }

    #[test]
    fn test_sub_does_not_mutate_operand_sign() {
        let a = TritInt::from_i64(10).unwrap();
        let b = TritInt::from_i64(4).unwrap();
        let _ = a.checked_sub(&b).unwrap();
        assert_eq!(b.sign(), Sign::Positive);
        assert_eq!(b.to_i64().unwrap(), 4);
    }

    #[test]
    fn test_neg_by_move() {
        let x = TritInt::from_i64(7).unwrap();
        let y = -x;
        assert_eq!(y.to_i64().unwrap(), -7);

        let z = -TritInt::zero().unwrap();
        assert_eq!(z.sign(), Sign::Positive);
    }

    #[test]
    fn test_compare_magnitude_ignores_padding() {
        let a = TritInt::from_i64(500).unwrap();
        let b = TritInt::from_i64(-500).unwrap();
        assert_eq!(a.compare_magnitude(&b), Ordering::Equal);

        let c = TritInt::from_i64(501).unwrap();
        assert_eq!(c.compare_magnitude(&a), Ordering::Greater);
        assert_eq!(a.compare_magnitude(&c), Ordering::Less);
    }

    #[test]
    fn test_signed_ordering() {
        let neg = TritInt::from_i64(-5).unwrap();
        let zero = TritInt::zero().unwrap();
        let pos = TritInt::from_i64(5).unwrap();
        assert!(neg < zero);
        assert!(zero < pos);
        assert!(neg < pos);

        let more_neg = TritInt::from_i64(-50).unwrap();
        assert!(more_neg < neg);
    }

    #[test]
    fn test_try_clone_is_independent() {
        let a = TritInt::from_i64(4242).unwrap();
        let b = a.try_clone().unwrap();
        assert_eq!(a, b);
        let c = -b;
        assert_eq!(a.to_i64().unwrap(), 4242);
        assert_eq!(c.to_i64().unwrap(), -4242);
    }

    #[test]
    fn test_grow_one_zeroes_new_digit() {
        let mut x = TritInt::from_base81_digits(Sign::Positive, &[7, 7]).unwrap();
        x.grow_one().unwrap();
        assert_eq!(x.digit_count(), 3);
        assert_eq!(x.digits(), &[7, 7, 0]);
    }
}
