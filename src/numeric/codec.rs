// ============================================================================
// Digit Codec
// Ternary text representation for TritInt values
// ============================================================================
//
// Grammar: ["-"] ("0"|"1"|"2")+
//
// Parsing folds text most-significant first via `value = value*3 + trit`
// over the base-81 digits; formatting repeatedly divides a working copy by
// 3 and collects remainders. Output is always normalized: no leading zero
// digits, canonical zero is "0".

use super::big_int::{Sign, TritInt, BASE};
use super::errors::{TritError, TritResult};
use crate::storage::allocate_digits;
use std::fmt;
use std::str::FromStr;

pub(crate) fn parse_ternary(text: &str) -> TritResult<TritInt> {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return Err(TritError::InvalidInput);
    }
    let (sign, trits) = match bytes[0] {
        b'-' => (Sign::Negative, &bytes[1..]),
        _ => (Sign::Positive, bytes),
    };
    if trits.is_empty() {
        return Err(TritError::InvalidInput);
    }

    let mut out = TritInt::zero()?;
    for &c in trits {
        let trit = match c {
            b'0'..=b'2' => (c - b'0') as u32,
            _ => return Err(TritError::InvalidInput),
        };
        // out = out*3 + trit in base-81.
        let mut carry = trit;
        for d in out.digits_mut() {
            let v = *d as u32 * 3 + carry;
            *d = (v % BASE) as u8;
            carry = v / BASE;
        }
        while carry > 0 {
            out.grow_one()?;
            let top = out.digit_count() - 1;
            out.digits_mut()[top] = (carry % BASE) as u8;
            carry /= BASE;
        }
    }
    // "-0" collapses to canonical zero here.
    out.set_sign(sign);
    Ok(out)
}

pub(crate) fn format_ternary(value: &TritInt) -> TritResult<String> {
    if value.is_zero() {
        return Ok("0".to_string());
    }
    // Working copy for the repeated division, drawn from the same arena
    // policy as any other digit buffer.
    let len = value.digit_count();
    let mut work = allocate_digits(len)?;
    work[..len].copy_from_slice(value.digits());

    let mut out: Vec<u8> = Vec::with_capacity(len * 4 + 2);
    while work[..len].iter().any(|&d| d != 0) {
        // Divide by 3 top-down, the remainder carrying into the next digit.
        let mut rem = 0u32;
        for i in (0..len).rev() {
            let v = work[i] as u32 + rem * BASE;
            work[i] = (v / 3) as u8;
            rem = v % 3;
        }
        out.push(b'0' + rem as u8);
    }
    if value.sign().is_negative() {
        out.push(b'-');
    }
    out.reverse();
    String::from_utf8(out).map_err(|_| TritError::InvalidInput)
}

impl TritInt {
    /// Render as canonical ternary text.
    ///
    /// # Errors
    /// `MemoryAlloc` or `MapFailed` if the working buffer cannot be
    /// allocated.
    pub fn to_ternary_string(&self) -> TritResult<String> {
        format_ternary(self)
    }
}

impl FromStr for TritInt {
    type Err = TritError;

    /// Parse ternary text: an optional leading `-` followed by one or more
    /// characters in `{0, 1, 2}`.
    ///
    /// # Examples
    /// - `"102"` -> 11
    /// - `"-12"` -> -5
    /// - `"0012"` -> 5 (leading zeros accepted on input, never produced)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_ternary(s)
    }
}

impl fmt::Display for TritInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_ternary_string().map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> TritInt {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_concrete_values() {
        assert_eq!(parse("0").to_i64().unwrap(), 0);
        assert_eq!(parse("1").to_i64().unwrap(), 1);
        assert_eq!(parse("2").to_i64().unwrap(), 2);
        assert_eq!(parse("10").to_i64().unwrap(), 3);
        assert_eq!(parse("102").to_i64().unwrap(), 11);
        assert_eq!(parse("-12").to_i64().unwrap(), -5);
        assert_eq!(parse("222").to_i64().unwrap(), 26);
        // 3^4 = 81 crosses into the second base-81 digit.
        assert_eq!(parse("10000").to_i64().unwrap(), 81);
        assert_eq!(parse("10000").digits(), &[0, 1]);
    }

    #[test]
    fn test_parse_accepts_leading_zeros() {
        assert_eq!(parse("0012").to_i64().unwrap(), 5);
        assert_eq!(parse("0012").to_ternary_string().unwrap(), "12");
    }

    #[test]
    fn test_parse_negative_zero_is_canonical() {
        let z = parse("-0");
        assert!(z.is_zero());
        assert_eq!(z.sign(), Sign::Positive);
        assert_eq!(z.to_ternary_string().unwrap(), "0");
    }

    #[test]
    fn test_parse_rejects_invalid_input() {
        for bad in ["", "-", "3", "1-2", "12a", "--1", " 12", "1 2"] {
            assert_eq!(
                bad.parse::<TritInt>(),
                Err(TritError::InvalidInput),
                "input {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_concrete_values() {
        assert_eq!(parse("102").to_string(), "102");
        assert_eq!(parse("-12").to_string(), "-12");
        assert_eq!(TritInt::zero().unwrap().to_string(), "0");
        assert_eq!(TritInt::from_i64(81).unwrap().to_string(), "10000");
        assert_eq!(TritInt::from_i64(-82).unwrap().to_string(), "-10001");
    }

    #[test]
    fn test_round_trip_long_value() {
        let text = "120210012102201210120012021120210012102";
        assert_eq!(parse(text).to_ternary_string().unwrap(), text);
    }
}
