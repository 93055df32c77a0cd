//! Overflow-safe integer scanning.
//!
//! One algorithm serves every primitive integer width. The scanner never
//! widens: each digit is checked against a threshold computed in the target
//! type itself, so overflow is detected before it can happen.

use std::io::{self, BufRead};

use crate::cursor::CharacterCursor;

/// The capability set the scanner needs from an integer type.
pub trait ScanInt: Copy + Ord {
    const MIN: Self;
    const MAX: Self;
    const ZERO: Self;

    /// Whether the type can hold negative values.
    fn is_signed() -> bool {
        Self::MIN < Self::ZERO
    }

    /// The value of decimal digit `d` (0..=9), negated when `negative`.
    ///
    /// Only called with `negative == true` on signed types.
    fn digit(d: u8, negative: bool) -> Self;

    /// `(bound - d) / 10`, truncating toward zero. Never overflows for a
    /// digit that has the same sign as `bound`.
    fn threshold(bound: Self, d: Self) -> Self;

    /// `self * 10 + d`. Callers guarantee the result is in range.
    fn push_digit(self, d: Self) -> Self;
}

macro_rules! impl_scan_int_signed {
    ($($t:ty),*) => {$(
        impl ScanInt for $t {
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0;

            fn digit(d: u8, negative: bool) -> Self {
                let d = d as $t;
                if negative { -d } else { d }
            }

            fn threshold(bound: Self, d: Self) -> Self {
                (bound - d) / 10
            }

            fn push_digit(self, d: Self) -> Self {
                self * 10 + d
            }
        }
    )*};
}

macro_rules! impl_scan_int_unsigned {
    ($($t:ty),*) => {$(
        impl ScanInt for $t {
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;
            const ZERO: Self = 0;

            fn digit(d: u8, _negative: bool) -> Self {
                d as $t
            }

            fn threshold(bound: Self, d: Self) -> Self {
                (bound - d) / 10
            }

            fn push_digit(self, d: Self) -> Self {
                self * 10 + d
            }
        }
    )*};
}

impl_scan_int_signed!(i8, i16, i32, i64, i128, isize);
impl_scan_int_unsigned!(u8, u16, u32, u64, u128, usize);

/// Scan an optional `-` and a maximal run of decimal digits into a `T`.
///
/// Returns `Ok(None)` when the text is not a valid `T`: a sign on an unsigned
/// type, no digits at all, or a value past `T::MIN`/`T::MAX`. Bytes consumed
/// before the failure stay consumed.
pub fn scan_integer<T: ScanInt, R: BufRead>(
    cursor: &mut CharacterCursor<R>,
) -> io::Result<Option<T>> {
    let mut negative = false;
    let mut bound = T::MAX;

    if cursor.peek()? == Some(b'-') {
        cursor.advance()?;
        if !T::is_signed() {
            return Ok(None);
        }
        negative = true;
        bound = T::MIN;
    }

    if !matches!(cursor.peek()?, Some(b) if b.is_ascii_digit()) {
        return Ok(None);
    }

    let mut value = T::ZERO;
    while let Some(byte) = cursor.peek()? {
        if !byte.is_ascii_digit() {
            break;
        }
        cursor.advance()?;

        let d = T::digit(byte - b'0', negative);
        let limit = T::threshold(bound, d);
        let past_bound = if negative { value < limit } else { value > limit };
        if past_bound {
            return Ok(None);
        }
        value = value.push_digit(d);
    }

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan<T: ScanInt>(input: &str) -> Option<T> {
        let mut cursor = CharacterCursor::new(input.as_bytes());
        scan_integer::<T, _>(&mut cursor).unwrap()
    }

    #[test]
    fn scans_plain_numbers() {
        assert_eq!(scan::<i32>("0"), Some(0));
        assert_eq!(scan::<i32>("42"), Some(42));
        assert_eq!(scan::<i32>("-17"), Some(-17));
        assert_eq!(scan::<u64>("18446744073709551615"), Some(u64::MAX));
    }

    #[test]
    fn stops_at_first_non_digit() {
        let mut cursor = CharacterCursor::new(&b"123 456"[..]);
        assert_eq!(scan_integer::<i32, _>(&mut cursor).unwrap(), Some(123));
        assert_eq!(cursor.peek().unwrap(), Some(b' '));
    }

    #[test]
    fn extremes_of_every_signed_width() {
        assert_eq!(scan::<i8>("-128"), Some(i8::MIN));
        assert_eq!(scan::<i8>("127"), Some(i8::MAX));
        assert_eq!(scan::<i8>("-129"), None);
        assert_eq!(scan::<i8>("128"), None);
        assert_eq!(scan::<i64>("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(scan::<i64>("9223372036854775808"), None);
        assert_eq!(
            scan::<i128>("-170141183460469231731687303715884105728"),
            Some(i128::MIN)
        );
    }

    #[test]
    fn sign_on_unsigned_fails_and_stays_consumed() {
        let mut cursor = CharacterCursor::new(&b"-5"[..]);
        assert_eq!(scan_integer::<u32, _>(&mut cursor).unwrap(), None);
        assert_eq!(cursor.peek().unwrap(), Some(b'5'));
    }

    #[test]
    fn sign_without_digits_fails() {
        assert_eq!(scan::<i32>("-"), None);
        assert_eq!(scan::<i32>("- 5"), None);
        assert_eq!(scan::<i32>(""), None);
        assert_eq!(scan::<i32>("abc"), None);
        assert_eq!(scan::<i32>("+5"), None);
    }

    #[test]
    fn leading_zeros_and_negative_zero_are_accepted() {
        assert_eq!(scan::<i32>("007"), Some(7));
        assert_eq!(scan::<i32>("-0"), Some(0));
    }

    #[test]
    fn overflow_leaves_remaining_digits_unconsumed() {
        // i8: "1280" fails on the '8' of "128"; only the final '0' is left.
        let mut cursor = CharacterCursor::new(&b"1280"[..]);
        assert_eq!(scan_integer::<i8, _>(&mut cursor).unwrap(), None);
        assert_eq!(cursor.peek().unwrap(), Some(b'0'));
    }
}
