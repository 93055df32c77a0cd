//! Byte cursor over a validator's input stream.
//!
//! The cursor only looks one byte ahead and never pushes back. Alongside the
//! bytes it keeps two diagnostic counters:
//!
//! - **line**: 1-based, bumped when the byte *after* a newline is consumed
//!   (so an error on a newline is reported on the line it terminates)
//! - **token**: 0-based count of whitespace→non-whitespace edges seen on the
//!   current line
//!
//! Both counters reflect the last *consumed* byte; `peek` never moves them.

use std::fmt;
use std::io::{self, BufRead};

/// Whitespace as judged by C's `isspace` in the "C" locale.
pub fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Line/token coordinates used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number, 1-based.
    pub line: usize,
    /// Tokens started so far on this line, 0-based.
    pub token: usize,
}

impl Position {
    /// Position before anything has been consumed.
    pub fn start() -> Self {
        Self { line: 1, token: 0 }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, Token {}", self.line, self.token)
    }
}

/// Class of the previously consumed byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastClass {
    /// Nothing consumed yet on this line (initial state, or after EOF).
    LineStart,
    /// A newline; the line counter moves on the next consumption.
    Newline,
    Whitespace,
    NonWhitespace,
}

/// Lookahead/consumption primitives over a buffered byte stream.
///
/// Design roughly follows the rustc lexer cursor: `peek` to look, `advance`
/// to take, with position bookkeeping done on the way through.
pub struct CharacterCursor<R> {
    input: R,
    position: Position,
    last: LastClass,
    eof_consumed: bool,
}

impl<R: BufRead> CharacterCursor<R> {
    /// Create a cursor positioned at the start of `input`.
    pub fn new(input: R) -> Self {
        Self {
            input,
            position: Position::start(),
            last: LastClass::LineStart,
            eof_consumed: false,
        }
    }

    /// Look at the next byte without consuming it. `None` is end of stream.
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.input.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Consume and return the next byte, or `None` at end of stream.
    ///
    /// Consuming at end of stream is allowed (and repeatable); it still
    /// settles a pending newline so diagnostics point past it.
    pub fn advance(&mut self) -> io::Result<Option<u8>> {
        let next = self.peek()?;
        if next.is_some() {
            self.input.consume(1);
        }

        if self.last == LastClass::Newline {
            self.position.line += 1;
            self.position.token = 0;
        }

        match next {
            Some(byte) => {
                let starts_token = !is_space(byte)
                    && matches!(
                        self.last,
                        LastClass::LineStart | LastClass::Newline | LastClass::Whitespace
                    );
                if starts_token {
                    self.position.token += 1;
                }
                self.last = if byte == b'\n' {
                    LastClass::Newline
                } else if is_space(byte) {
                    LastClass::Whitespace
                } else {
                    LastClass::NonWhitespace
                };
            }
            None => {
                self.eof_consumed = true;
                if self.last == LastClass::Newline {
                    self.last = LastClass::LineStart;
                }
            }
        }

        Ok(next)
    }

    /// Consume bytes while `pred` holds for the lookahead, appending them to `out`.
    ///
    /// Stops at end of stream. Returns the number of bytes taken.
    pub fn take_while(&mut self, pred: impl Fn(u8) -> bool, out: &mut Vec<u8>) -> io::Result<usize> {
        let mut taken = 0;
        while let Some(byte) = self.peek()? {
            if !pred(byte) {
                break;
            }
            self.advance()?;
            out.push(byte);
            taken += 1;
        }
        Ok(taken)
    }

    /// Line number as of the last consumed byte.
    pub fn line_count(&self) -> usize {
        self.position.line
    }

    /// Tokens started on the current line as of the last consumed byte.
    pub fn token_count(&self) -> usize {
        self.position.token
    }

    /// Both counters together.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether end of stream has been consumed via `advance`.
    pub fn eof_consumed(&self) -> bool {
        self.eof_consumed
    }
}
