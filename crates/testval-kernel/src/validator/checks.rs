//! Constraint checks. None of these touch the input stream.
//!
//! Every check takes a caller message; pass `""` for the default one.

use std::fmt;
use std::io::{BufRead, Write};

use super::{messages, Validator};
use crate::char_class::CharClass;
use crate::error::{ErrorKind, Result};

impl<R: BufRead, W: Write> Validator<R, W> {
    /// Require `lo <= x <= hi`.
    pub fn check_number_between<T>(&mut self, x: T, lo: T, hi: T, msg: &str) -> Result<()>
    where
        T: PartialOrd + fmt::Display,
    {
        self.ensure_open()?;
        self.ensure_bounds(&lo, &hi)?;
        if x < lo || x > hi {
            return self.reject(ErrorKind::ConstraintViolation, msg, messages::NUMBER_OUT_OF_BOUNDS);
        }
        Ok(())
    }

    /// Require `x` to be a member of `class`.
    pub fn check_char_matches(&mut self, x: u8, class: &CharClass, msg: &str) -> Result<()> {
        self.ensure_open()?;
        if !class.contains(x) {
            return self.reject(ErrorKind::ConstraintViolation, msg, messages::CHAR_CLASS_MISMATCH);
        }
        Ok(())
    }

    /// Require `lo <= x.len() <= hi`.
    pub fn check_string_length_between(
        &mut self,
        x: impl AsRef<[u8]>,
        lo: usize,
        hi: usize,
        msg: &str,
    ) -> Result<()> {
        self.ensure_open()?;
        self.ensure_bounds(&lo, &hi)?;
        let len = x.as_ref().len();
        if len < lo || len > hi {
            return self.reject(
                ErrorKind::ConstraintViolation,
                msg,
                messages::STRING_SIZE_OUT_OF_BOUNDS,
            );
        }
        Ok(())
    }

    /// Require every byte of `x` to be a member of `class`.
    pub fn check_string_matches(&mut self, x: impl AsRef<[u8]>, class: &CharClass, msg: &str) -> Result<()> {
        for &byte in x.as_ref() {
            self.check_char_matches(byte, class, msg)?;
        }
        self.ensure_open()
    }

    /// Require `lo <= start <= end <= hi`.
    pub fn check_interval<T>(&mut self, start: T, end: T, lo: T, hi: T, msg: &str) -> Result<()>
    where
        T: PartialOrd + fmt::Display,
    {
        self.ensure_open()?;
        self.ensure_bounds(&lo, &hi)?;
        if !(lo <= start && start <= end && end <= hi) {
            return self.reject(ErrorKind::ConstraintViolation, msg, messages::INTERVAL_VIOLATED);
        }
        Ok(())
    }

    /// Require `cond` to hold.
    pub fn check_condition(&mut self, cond: bool, msg: &str) -> Result<()> {
        self.ensure_open()?;
        if !cond {
            return self.reject(ErrorKind::ConstraintViolation, msg, messages::CONDITION_FAILED);
        }
        Ok(())
    }
}
