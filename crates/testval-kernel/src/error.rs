//! Rejections and internal faults.
//!
//! Two kinds of failure leave a validator call:
//!
//! - `ValidatorError::Rejected`: the input broke the grammar. This is the
//!   abort signal; it is already written to the sink when you receive it.
//! - everything else: the validator itself could not do its job (I/O
//!   failure, API misuse). Nothing was written to the sink for these.

use std::fmt;
use std::io;

use crate::cursor::Position;

/// Why an input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A read expected more input than remained.
    StreamExhausted,
    /// No digits, a sign on an unsigned type, or overflow for the width.
    MalformedInteger,
    /// A required separator (space, newline, EOF) did not match.
    UnexpectedCharacter,
    /// A range, class, length, interval, or condition check failed.
    ConstraintViolation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::StreamExhausted => "stream exhausted",
            ErrorKind::MalformedInteger => "malformed integer",
            ErrorKind::UnexpectedCharacter => "unexpected character",
            ErrorKind::ConstraintViolation => "constraint violation",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single reported violation of a rejected run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Position,
}

impl fmt::Display for Rejection {
    /// Same text as the sink receives, minus the trailing blank line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\nError: {}", self.position, self.message)
    }
}

/// Everything a validator operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ValidatorError {
    /// The input was rejected. The diagnostic is already in the sink.
    #[error("{0}")]
    Rejected(Rejection),

    /// Reading the input or writing the sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An operation was called after the run reached a terminal state.
    #[error("validator used after the run was closed")]
    RunClosed,

    /// The grammar passed arguments that can never be satisfied (e.g. `lo > hi`).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ValidatorError {
    /// True for the expected outcome "input rejected", false for internal faults.
    pub fn is_rejection(&self) -> bool {
        matches!(self, ValidatorError::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ValidatorError::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

/// Result type for validator operations.
pub type Result<T> = std::result::Result<T, ValidatorError>;
