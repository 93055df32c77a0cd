//! Read-then-check operations.
//!
//! The read always runs first and the check only runs on a successful read,
//! so a malformed token is reported as a read failure, never as a bounds
//! failure. Bounds are validated up front so a misuse surfaces regardless
//! of the input. The caller's `msg` applies to the check, not the read.

use std::fmt;
use std::io::{BufRead, Write};

use bstr::BString;

use super::Validator;
use crate::char_class::CharClass;
use crate::error::Result;
use crate::scanner::ScanInt;

impl<R: BufRead, W: Write> Validator<R, W> {
    /// Read an integer and require `lo <= x <= hi`.
    pub fn read_integer_between<T>(&mut self, lo: T, hi: T, msg: &str) -> Result<T>
    where
        T: ScanInt + fmt::Display,
    {
        self.ensure_bounds(&lo, &hi)?;
        let x = self.read_integer::<T>()?;
        self.check_number_between(x, lo, hi, msg)?;
        Ok(x)
    }

    /// Read `count` integers separated by single spaces, each in `[lo, hi]`.
    ///
    /// Nothing is consumed after the last integer.
    pub fn read_integers_between<T>(&mut self, count: usize, lo: T, hi: T, msg: &str) -> Result<Vec<T>>
    where
        T: ScanInt + fmt::Display,
    {
        self.ensure_bounds(&lo, &hi)?;
        let mut values = Vec::with_capacity(count);
        for i in 0..count {
            if i > 0 {
                self.read_space()?;
            }
            values.push(self.read_integer_between(lo, hi, msg)?);
        }
        Ok(values)
    }

    /// Read `start end` (one space apart) and require `lo <= start <= end <= hi`.
    pub fn read_interval_between<T>(&mut self, lo: T, hi: T, msg: &str) -> Result<(T, T)>
    where
        T: ScanInt + fmt::Display,
    {
        self.ensure_bounds(&lo, &hi)?;
        let start = self.read_integer::<T>()?;
        self.read_space()?;
        let end = self.read_integer::<T>()?;
        self.check_interval(start, end, lo, hi, msg)?;
        Ok((start, end))
    }

    /// Read one byte and require it to be in `class`.
    pub fn read_char_matching(&mut self, class: &CharClass, msg: &str) -> Result<u8> {
        let x = self.read_char()?;
        self.check_char_matches(x, class, msg)?;
        Ok(x)
    }

    /// Read a token and require every byte to be in `class`.
    pub fn read_string_matching(&mut self, class: &CharClass, msg: &str) -> Result<BString> {
        let x = self.read_string()?;
        self.check_string_matches(&x, class, msg)?;
        Ok(x)
    }

    /// Read a token, require `lo <= len <= hi`, then require every byte in `class`.
    pub fn read_string_between(
        &mut self,
        lo: usize,
        hi: usize,
        class: &CharClass,
        msg: &str,
    ) -> Result<BString> {
        self.ensure_bounds(&lo, &hi)?;
        let x = self.read_string()?;
        self.check_string_length_between(&x, lo, hi, msg)?;
        self.check_string_matches(&x, class, msg)?;
        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use crate::char_class::CharClass;
    use crate::error::{ErrorKind, ValidatorError};
    use crate::validator::{messages, Validator};

    fn validator(input: &'static str) -> Validator<&'static [u8], Vec<u8>> {
        Validator::new(input.as_bytes(), Vec::new())
    }

    fn message_of(err: ValidatorError) -> String {
        err.rejection().map(|r| r.message.clone()).unwrap_or_default()
    }

    #[test]
    fn read_failure_wins_over_bounds() {
        let mut v = validator("abc");
        let err = v.read_integer_between::<i32>(1, 10, "custom").unwrap_err();
        assert_eq!(message_of(err), messages::INTEGER_READ_FAILED);
    }

    #[test]
    fn bounds_failure_after_good_read() {
        let mut v = validator("999");
        let err = v.read_integer_between::<i32>(1, 10, "").unwrap_err();
        assert_eq!(message_of(err), messages::NUMBER_OUT_OF_BOUNDS);
    }

    #[test]
    fn reads_a_line_of_integers() {
        let mut v = validator("1 2 3\n");
        assert_eq!(v.read_integers_between::<u16>(3, 1, 3, "").unwrap(), vec![1, 2, 3]);
        v.read_end_of_line().unwrap();
    }

    #[test]
    fn integers_require_single_spaces() {
        let mut v = validator("1  2");
        let err = v.read_integers_between::<u16>(2, 0, 9, "").unwrap_err();
        assert_eq!(message_of(err), messages::INTEGER_READ_FAILED);
    }

    #[test]
    fn zero_integers_reads_nothing() {
        let mut v = validator("x");
        assert!(v.read_integers_between::<i32>(0, 0, 1, "").unwrap().is_empty());
        assert_eq!(v.read_char().unwrap(), b'x');
    }

    #[test]
    fn interval_reads_two_numbers() {
        let mut v = validator("3 7");
        assert_eq!(v.read_interval_between::<i64>(1, 10, "").unwrap(), (3, 7));
    }

    #[test]
    fn reversed_interval_is_rejected() {
        let mut v = validator("7 3");
        let err = v.read_interval_between::<i64>(1, 10, "").unwrap_err();
        assert_eq!(message_of(err), messages::INTERVAL_VIOLATED);
    }

    #[test]
    fn interval_needs_the_space() {
        let mut v = validator("3,7");
        let err = v.read_interval_between::<i64>(1, 10, "").unwrap_err();
        assert_eq!(err.rejection().unwrap().kind, ErrorKind::UnexpectedCharacter);
    }

    #[test]
    fn char_matching() {
        let grid = CharClass::from_bytes(b".#");
        let mut v = validator("#.x");
        assert_eq!(v.read_char_matching(&grid, "").unwrap(), b'#');
        assert_eq!(v.read_char_matching(&grid, "").unwrap(), b'.');
        let err = v.read_char_matching(&grid, "bad cell").unwrap_err();
        assert_eq!(message_of(err), "bad cell");
    }

    #[test]
    fn string_matching() {
        let mut v = validator("hello World");
        assert_eq!(v.read_string_matching(&CharClass::LOWERCASE, "").unwrap(), "hello");
        v.read_space().unwrap();
        let err = v.read_string_matching(&CharClass::LOWERCASE, "").unwrap_err();
        assert_eq!(message_of(err), messages::CHAR_CLASS_MISMATCH);
    }

    #[test]
    fn string_between_checks_length_before_class() {
        let mut v = validator("ABCDEF");
        let err = v
            .read_string_between(1, 3, &CharClass::LOWERCASE, "")
            .unwrap_err();
        assert_eq!(message_of(err), messages::STRING_SIZE_OUT_OF_BOUNDS);

        let mut v = validator("abc");
        assert_eq!(v.read_string_between(1, 3, &CharClass::LOWERCASE, "").unwrap(), "abc");
    }
}
