//! The validator: typed reads, constraint checks, fail-fast reporting.
//!
//! A grammar is ordinary Rust code calling validator operations in the order
//! the input format dictates. Each operation either succeeds and advances
//! the cursor, or reports the violation to the sink and returns
//! `ValidatorError::Rejected`, which the grammar propagates with `?`.
//!
//! # Lifecycle
//!
//! ```text
//! OPEN ──finish()──► VALIDATED   (success marker written)
//!   │
//!   └──first report_error──► REJECTED   (one diagnostic written)
//! ```
//!
//! Nothing leaves a terminal state: operations on a closed run return
//! `ValidatorError::RunClosed`. Prefer [`run`], which calls `finish` for you.
//!
//! # Example
//!
//! ```ignore
//! let verdict = testval_kernel::run(input, &mut out, config, |v| {
//!     let n: u32 = v.read_integer_between(1, 1000, "N out of range")?;
//!     v.read_end_of_line()?;
//!     for _ in 0..n {
//!         v.read_interval_between::<i64>(1, 1_000_000_000, "")?;
//!         v.read_end_of_line()?;
//!     }
//!     v.read_end_of_file()
//! })?;
//! ```

mod checks;
mod composite;
mod reads;

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::config::ValidatorConfig;
use crate::cursor::{CharacterCursor, Position};
use crate::error::{ErrorKind, Rejection, Result, ValidatorError};
use crate::verdict::Verdict;

/// Default diagnostic messages, used when the caller passes an empty message.
pub mod messages {
    pub const UNEXPECTED_END_OF_FILE: &str = "Unexpected end of file.";
    pub const INTEGER_READ_FAILED: &str = "Integer read failed.";
    pub const STRING_READ_FAILED: &str = "String read failed.";
    pub const EXPECTED_SPACE: &str = "Expected space.";
    pub const EXPECTED_END_OF_LINE: &str = "Expected end of line.";
    pub const EXPECTED_END_OF_FILE: &str = "Expected end of file.";
    pub const NUMBER_OUT_OF_BOUNDS: &str = "Number out of bounds.";
    pub const CHAR_CLASS_MISMATCH: &str = "Character doesn't match character class.";
    pub const STRING_SIZE_OUT_OF_BOUNDS: &str = "string size out of bounds.";
    pub const INTERVAL_VIOLATED: &str = "Interval does not satisfy constraints.";
    pub const CONDITION_FAILED: &str = "Condition failed.";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Open,
    Validated,
    Rejected,
    /// An internal fault (I/O, sink failure) ended the run without a verdict.
    Faulted,
}

/// Validates one input stream, writing diagnostics to one sink.
#[must_use = "a validator must be concluded with `finish()`"]
pub struct Validator<R, W> {
    cursor: CharacterCursor<R>,
    sink: W,
    config: ValidatorConfig,
    error_count: usize,
    state: RunState,
}

impl<R: BufRead, W: Write> Validator<R, W> {
    /// Create a validator with default configuration.
    pub fn new(input: R, sink: W) -> Self {
        Self::with_config(input, sink, ValidatorConfig::default())
    }

    /// Create a validator with the given configuration.
    pub fn with_config(input: R, sink: W, config: ValidatorConfig) -> Self {
        tracing::debug!(require_eof = config.require_end_of_file, "validation run opened");
        Self {
            cursor: CharacterCursor::new(input),
            sink,
            config,
            error_count: 0,
            state: RunState::Open,
        }
    }

    /// Current line/token coordinates.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    pub fn line_count(&self) -> usize {
        self.cursor.line_count()
    }

    pub fn token_count(&self) -> usize {
        self.cursor.token_count()
    }

    /// Errors reported so far. Fail-fast keeps this at 0 or 1.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Whether the run still accepts operations.
    pub fn is_open(&self) -> bool {
        self.state == RunState::Open
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Report a violation and close the run as REJECTED.
    ///
    /// Writes `Line <N>, Token <M>` / `Error: <message>` / blank line to the
    /// sink, using `default_msg` when `msg` is empty. Returns the abort value;
    /// callers hand it back with `Err(..)` so it unwinds the grammar.
    pub fn report_error(&mut self, kind: ErrorKind, msg: &str, default_msg: &str) -> ValidatorError {
        if self.state != RunState::Open {
            return ValidatorError::RunClosed;
        }
        self.error_count += 1;
        self.state = RunState::Rejected;

        let message = if msg.is_empty() { default_msg } else { msg };
        let rejection = Rejection {
            kind,
            message: message.to_string(),
            position: self.cursor.position(),
        };
        tracing::info!(
            line = rejection.position.line,
            token = rejection.position.token,
            kind = %kind,
            "input rejected: {}",
            rejection.message
        );

        if let Err(e) = write!(self.sink, "{rejection}\n\n").and_then(|()| self.sink.flush()) {
            self.state = RunState::Faulted;
            tracing::warn!(error = %e, "failed to write diagnostic to sink");
            return ValidatorError::Io(e);
        }
        ValidatorError::Rejected(rejection)
    }

    /// Conclude the run and return its verdict.
    ///
    /// An open run with no errors writes the success marker exactly once and
    /// becomes VALIDATED. With `require_end_of_file` set, an open run whose
    /// grammar never consumed end of file is rejected here instead.
    pub fn finish(mut self) -> Result<Verdict> {
        match self.state {
            RunState::Open => {
                if self.config.require_end_of_file && !self.cursor.eof_consumed() {
                    let err = self.report_error(
                        ErrorKind::UnexpectedCharacter,
                        "",
                        messages::EXPECTED_END_OF_FILE,
                    );
                    return match err {
                        ValidatorError::Rejected(_) => Ok(self.rejected_verdict()),
                        other => Err(other),
                    };
                }
                self.emit_success_marker()?;
                self.state = RunState::Validated;
                tracing::debug!("validation run validated");
                Ok(Verdict::Validated)
            }
            RunState::Rejected => Ok(self.rejected_verdict()),
            RunState::Validated | RunState::Faulted => Err(ValidatorError::RunClosed),
        }
    }

    fn emit_success_marker(&mut self) -> Result<()> {
        let written = writeln!(self.sink, "{}", self.config.success_marker)
            .and_then(|()| self.sink.flush());
        if let Err(e) = written {
            self.state = RunState::Faulted;
            tracing::warn!(error = %e, "failed to write success marker to sink");
            return Err(e.into());
        }
        Ok(())
    }

    fn rejected_verdict(&self) -> Verdict {
        Verdict::Rejected {
            error_count: self.error_count,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.state == RunState::Open {
            Ok(())
        } else {
            Err(ValidatorError::RunClosed)
        }
    }

    /// `report_error` wrapped as an `Err`.
    fn reject<T>(&mut self, kind: ErrorKind, msg: &str, default_msg: &str) -> Result<T> {
        Err(self.report_error(kind, msg, default_msg))
    }

    /// Lift a cursor I/O result, marking the run faulted on failure.
    fn io<T>(&mut self, result: io::Result<T>) -> Result<T> {
        result.map_err(|e| {
            self.state = RunState::Faulted;
            ValidatorError::Io(e)
        })
    }

    fn ensure_bounds<T: PartialOrd + fmt::Display>(&self, lo: &T, hi: &T) -> Result<()> {
        if lo > hi {
            return Err(ValidatorError::InvalidArgument(format!(
                "lower bound {lo} exceeds upper bound {hi}"
            )));
        }
        Ok(())
    }
}

impl<R, W> Drop for Validator<R, W> {
    fn drop(&mut self) {
        if self.state == RunState::Open {
            tracing::error!(
                errors = self.error_count,
                "validator dropped without finish(); no verdict was emitted"
            );
        }
    }
}

/// Run `grammar` over `input` and conclude the run.
///
/// This is the scoped form of a validation run: `finish` is called exactly
/// once whether the grammar succeeds or is rejected, so the success marker
/// can't be forgotten. Internal faults are returned as errors with no
/// verdict.
pub fn run<R, W, F>(input: R, sink: W, config: ValidatorConfig, grammar: F) -> Result<Verdict>
where
    R: BufRead,
    W: Write,
    F: FnOnce(&mut Validator<R, W>) -> Result<()>,
{
    let mut validator = Validator::with_config(input, sink, config);
    match grammar(&mut validator) {
        Ok(()) => validator.finish(),
        Err(ValidatorError::Rejected(_)) if validator.error_count() > 0 => validator.finish(),
        Err(e) => {
            validator.state = RunState::Faulted;
            Err(e)
        }
    }
}
