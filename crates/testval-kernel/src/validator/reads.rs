//! Structural and typed reads.

use std::io::{BufRead, Write};

use bstr::BString;

use super::{messages, Validator};
use crate::cursor::is_space;
use crate::error::{ErrorKind, Result};
use crate::scanner::{scan_integer, ScanInt};

impl<R: BufRead, W: Write> Validator<R, W> {
    /// Consume one byte, whatever it is. Fails only at end of stream.
    pub fn read_char(&mut self) -> Result<u8> {
        self.ensure_open()?;
        let next = self.cursor.advance();
        match self.io(next)? {
            Some(byte) => Ok(byte),
            None => self.reject(ErrorKind::StreamExhausted, "", messages::UNEXPECTED_END_OF_FILE),
        }
    }

    /// Scan an optionally signed decimal integer of type `T`.
    pub fn read_integer<T: ScanInt>(&mut self) -> Result<T> {
        self.ensure_open()?;
        let next = self.cursor.peek();
        if self.io(next)?.is_none() {
            return self.reject(ErrorKind::StreamExhausted, "", messages::INTEGER_READ_FAILED);
        }
        let scanned = scan_integer::<T, R>(&mut self.cursor);
        match self.io(scanned)? {
            Some(value) => Ok(value),
            None => self.reject(ErrorKind::MalformedInteger, "", messages::INTEGER_READ_FAILED),
        }
    }

    /// Read a token: a non-empty maximal run of non-whitespace bytes.
    pub fn read_string(&mut self) -> Result<BString> {
        self.ensure_open()?;
        let next = self.cursor.peek();
        match self.io(next)? {
            None => {
                return self.reject(ErrorKind::StreamExhausted, "", messages::STRING_READ_FAILED);
            }
            Some(byte) if is_space(byte) => {
                return self.reject(ErrorKind::UnexpectedCharacter, "", messages::STRING_READ_FAILED);
            }
            Some(_) => {}
        }

        let mut token = Vec::new();
        let taken = self.cursor.take_while(|b| !is_space(b), &mut token);
        self.io(taken)?;
        Ok(BString::from(token))
    }

    /// Consume exactly one `' '`.
    pub fn read_space(&mut self) -> Result<()> {
        self.read_separator(Some(b' '), messages::EXPECTED_SPACE)
    }

    /// Consume exactly one `'\n'`.
    pub fn read_end_of_line(&mut self) -> Result<()> {
        self.read_separator(Some(b'\n'), messages::EXPECTED_END_OF_LINE)
    }

    /// Consume end of stream. Any remaining byte is an error.
    pub fn read_end_of_file(&mut self) -> Result<()> {
        self.read_separator(None, messages::EXPECTED_END_OF_FILE)
    }

    fn read_separator(&mut self, expected: Option<u8>, default_msg: &str) -> Result<()> {
        self.ensure_open()?;
        let next = self.cursor.advance();
        let got = self.io(next)?;
        if got == expected {
            return Ok(());
        }
        let kind = match got {
            None => ErrorKind::StreamExhausted,
            Some(_) => ErrorKind::UnexpectedCharacter,
        };
        self.reject(kind, "", default_msg)
    }
}
