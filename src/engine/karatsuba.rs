// ============================================================================
// Multiplication Kernels
// Schoolbook base case and recursive Karatsuba over base-81 digit arrays
// ============================================================================

use crate::numeric::{Sign, TritInt, TritResult, BASE};
use crate::storage::allocate_digits;

/// Operand digit length at or below which multiplication stays schoolbook.
///
/// Below this the O(n^2) inner loop beats the recursion overhead; above it
/// the three-way split wins (~O(n^1.585)).
pub const KARATSUBA_CUTOFF: usize = 16;

// ============================================================================
// Digit Array Helpers
// ============================================================================

/// Schoolbook product of two digit arrays into `out`.
///
/// `out` must hold at least `a.len() + b.len()` digits; that prefix is
/// cleared first. Each partial product lands at position `i + j` with the
/// carry rippled forward.
pub(crate) fn schoolbook_mul(a: &[u8], b: &[u8], out: &mut [u8]) {
    debug_assert!(out.len() >= a.len() + b.len());
    out[..a.len() + b.len()].fill(0);
    for (i, &ad) in a.iter().enumerate() {
        let mut carry = 0u32;
        for (j, &bd) in b.iter().enumerate() {
            let idx = i + j;
            let v = out[idx] as u32 + ad as u32 * bd as u32 + carry;
            out[idx] = (v % BASE) as u8;
            carry = v / BASE;
        }
        let mut idx = i + b.len();
        while carry > 0 {
            let v = out[idx] as u32 + carry;
            out[idx] = (v % BASE) as u8;
            carry = v / BASE;
            idx += 1;
        }
    }
}

/// `dest[shift..] += src`, carry rippled, clamped to `dest`'s bounds.
/// Digits of `src` beyond the clamp are zero for every caller.
fn add_shifted(dest: &mut [u8], src: &[u8], shift: usize) {
    if shift >= dest.len() {
        return;
    }
    let dest = &mut dest[shift..];
    let mut carry = 0u32;
    for (i, &s) in src.iter().enumerate() {
        if i >= dest.len() {
            break;
        }
        let v = dest[i] as u32 + s as u32 + carry;
        dest[i] = (v % BASE) as u8;
        carry = v / BASE;
    }
    let mut i = src.len();
    while carry > 0 && i < dest.len() {
        let v = dest[i] as u32 + carry;
        dest[i] = (v % BASE) as u8;
        carry = v / BASE;
        i += 1;
    }
}

/// `dest -= src` in base-81; `dest` must dominate `src` numerically.
fn sub_in_place(dest: &mut [u8], src: &[u8]) {
    let mut borrow = 0u32;
    for i in 0..src.len() {
        let d = dest[i] as i32 - src[i] as i32 - borrow as i32;
        if d < 0 {
            dest[i] = (d + BASE as i32) as u8;
            borrow = 1;
        } else {
            dest[i] = d as u8;
            borrow = 0;
        }
    }
    let mut i = src.len();
    while borrow > 0 && i < dest.len() {
        if dest[i] == 0 {
            dest[i] = (BASE - 1) as u8;
        } else {
            dest[i] -= 1;
            borrow = 0;
        }
        i += 1;
    }
}

// ============================================================================
// Karatsuba Recursion
// ============================================================================

/// Equal-length recursion; `out` holds `2 * a.len()` digits.
///
/// Splits at `half = n/2`, the high halves carrying the odd remainder
/// `r = n - half`. The half-sums are widened by one digit so their top
/// carry is never dropped, then `p3 = (A0+A1)(B0+B1) - p1 - p2` is combined
/// by shifted addition.
fn karatsuba_rec(a: &[u8], b: &[u8], out: &mut [u8], cutoff: usize) {
    let n = a.len();
    debug_assert_eq!(b.len(), n);
    debug_assert!(out.len() >= 2 * n);
    // Below four digits the widened half-sum is as long as the operand and
    // the split stops shrinking, so those sizes always go schoolbook.
    if n <= cutoff || n < 4 {
        schoolbook_mul(a, b, out);
        return;
    }
    let half = n / 2;
    let r = n - half;
    let (a0, a1) = a.split_at(half);
    let (b0, b1) = b.split_at(half);

    let mut p1 = vec![0u8; 2 * half];
    karatsuba_rec(a0, b0, &mut p1, cutoff);
    let mut p2 = vec![0u8; 2 * r];
    karatsuba_rec(a1, b1, &mut p2, cutoff);

    let widened = r + 1;
    let mut sum_a = vec![0u8; widened];
    sum_a[..r].copy_from_slice(a1);
    add_shifted(&mut sum_a, a0, 0);
    let mut sum_b = vec![0u8; widened];
    sum_b[..r].copy_from_slice(b1);
    add_shifted(&mut sum_b, b0, 0);

    let mut p3 = vec![0u8; 2 * widened];
    karatsuba_rec(&sum_a, &sum_b, &mut p3, cutoff);
    sub_in_place(&mut p3, &p1);
    sub_in_place(&mut p3, &p2);

    out[..2 * n].fill(0);
    add_shifted(out, &p1, 0);
    add_shifted(out, &p3, half);
    add_shifted(out, &p2, 2 * half);
}

// ============================================================================
// Entry Point
// ============================================================================

/// Uncached signed multiply.
///
/// Either operand normalizing to zero short-circuits to the canonical zero
/// without entering the recursion. Otherwise both operands are padded to a
/// common length, multiplied, trimmed, and signed by XOR of the operand
/// signs.
///
/// # Errors
/// `MemoryAlloc` or `MapFailed` if the result buffer cannot be obtained.
pub fn multiply(a: &TritInt, b: &TritInt, cutoff: usize) -> TritResult<TritInt> {
    if a.is_zero() || b.is_zero() {
        return TritInt::zero();
    }
    let n = a.digit_count().max(b.digit_count());
    let mut pa = vec![0u8; n];
    pa[..a.digit_count()].copy_from_slice(a.digits());
    let mut pb = vec![0u8; n];
    pb[..b.digit_count()].copy_from_slice(b.digits());

    let mut prod = vec![0u8; 2 * n];
    karatsuba_rec(&pa, &pb, &mut prod, cutoff.max(1));

    let mut out_len = 2 * n;
    while out_len > 1 && prod[out_len - 1] == 0 {
        out_len -= 1;
    }
    let sign = if a.sign() != b.sign() {
        Sign::Negative
    } else {
        Sign::Positive
    };
    let mut buf = allocate_digits(out_len)?;
    buf[..out_len].copy_from_slice(&prod[..out_len]);
    Ok(TritInt::from_buf(sign, buf, out_len))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Plain schoolbook multiply used as the test oracle.
    fn reference_multiply(a: &TritInt, b: &TritInt) -> TritInt {
        if a.is_zero() || b.is_zero() {
            return TritInt::zero().unwrap();
        }
        let mut out = vec![0u8; a.digit_count() + b.digit_count()];
        schoolbook_mul(a.digits(), b.digits(), &mut out);
        let sign = if a.sign() != b.sign() {
            Sign::Negative
        } else {
            Sign::Positive
        };
        TritInt::from_base81_digits(sign, &out).unwrap()
    }

    #[test]
    fn test_small_products() {
        for (x, y) in [(11i64, 3i64), (80, 80), (0, 5), (5, 0), (-7, 6), (-7, -6)] {
            let a = TritInt::from_i64(x).unwrap();
            let b = TritInt::from_i64(y).unwrap();
            let p = multiply(&a, &b, KARATSUBA_CUTOFF).unwrap();
            assert_eq!(p.to_i64().unwrap(), x * y, "{x} * {y}");
        }
    }

    #[test]
    fn test_zero_short_circuit_is_canonical() {
        let z = TritInt::zero().unwrap();
        let neg = TritInt::from_i64(-42).unwrap();
        let p = multiply(&neg, &z, KARATSUBA_CUTOFF).unwrap();
        assert!(p.is_zero());
        assert_eq!(p.sign(), Sign::Positive);
    }

    #[test]
    fn test_sign_rule() {
        let a = TritInt::from_i64(-12).unwrap();
        let b = TritInt::from_i64(12).unwrap();
        assert_eq!(multiply(&a, &b, 16).unwrap().to_i64().unwrap(), -144);
        assert_eq!(multiply(&a, &a, 16).unwrap().to_i64().unwrap(), 144);
    }

    #[test]
    fn test_recursion_on_max_digits() {
        // 33 digits of 80 forces an odd split with maximal carries.
        let digits = vec![80u8; 33];
        let a = TritInt::from_base81_digits(Sign::Positive, &digits).unwrap();
        let b = TritInt::from_base81_digits(Sign::Negative, &digits).unwrap();
        let via_recursion = multiply(&a, &b, 2).unwrap();
        assert_eq!(via_recursion, reference_multiply(&a, &b));
    }

    #[test]
    fn test_cutoff_one_still_correct() {
        let a = TritInt::from_i64(123_456_789).unwrap();
        let b = TritInt::from_i64(987_654_321).unwrap();
        let p = multiply(&a, &b, 1).unwrap();
        assert_eq!(p.to_i64().unwrap(), 123_456_789i64 * 987_654_321);
    }

    fn digit_vec() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(0u8..81, 1..48)
    }

    proptest! {
        // Operand lengths straddle the cutoff, so both the base case and
        // the recursion are exercised against the oracle.
        #[test]
        fn prop_karatsuba_matches_schoolbook(a in digit_vec(), b in digit_vec(), neg_a: bool, neg_b: bool) {
            let sa = if neg_a { Sign::Negative } else { Sign::Positive };
            let sb = if neg_b { Sign::Negative } else { Sign::Positive };
            let x = TritInt::from_base81_digits(sa, &a).unwrap();
            let y = TritInt::from_base81_digits(sb, &b).unwrap();
            let fast = multiply(&x, &y, KARATSUBA_CUTOFF).unwrap();
            prop_assert_eq!(fast, reference_multiply(&x, &y));
        }

        #[test]
        fn prop_multiply_commutes(a in digit_vec(), b in digit_vec()) {
            let x = TritInt::from_base81_digits(Sign::Positive, &a).unwrap();
            let y = TritInt::from_base81_digits(Sign::Positive, &b).unwrap();
            let xy = multiply(&x, &y, KARATSUBA_CUTOFF).unwrap();
            let yx = multiply(&y, &x, KARATSUBA_CUTOFF).unwrap();
            prop_assert_eq!(xy, yx);
        }
    }
}
