//! Built-in problem grammars.
//!
//! Each grammar is a plain function over a [`Validator`], reading the input
//! format top to bottom and propagating rejections with `?`.

use std::fmt;
use std::io::{BufRead, Write};

use testval_kernel::{CharClass, Validator, ValidatorError};

type GrammarResult = Result<(), ValidatorError>;

const GRID_CELLS: CharClass = CharClass::from_bytes(b".#");

/// A built-in problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Problem {
    Basic,
    Intervals,
    Words,
    Grid,
}

impl Problem {
    pub const ALL: [Problem; 4] = [Problem::Basic, Problem::Intervals, Problem::Words, Problem::Grid];

    pub fn name(self) -> &'static str {
        match self {
            Problem::Basic => "basic",
            Problem::Intervals => "intervals",
            Problem::Words => "words",
            Problem::Grid => "grid",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Problem::Basic => "one integer in [1, 50], then end of file",
            Problem::Intervals => "N in [1, 1000], then N lines `a b` with 1 <= a <= b <= 10^9",
            Problem::Words => "N in [1, 100], then N lowercase words of length [1, 20]",
            Problem::Grid => "R C in [1, 50], then R rows of C cells from `.#`",
        }
    }

    /// Run this problem's grammar.
    pub fn validate<R: BufRead, W: Write>(self, v: &mut Validator<R, W>) -> GrammarResult {
        match self {
            Problem::Basic => basic(v),
            Problem::Intervals => intervals(v),
            Problem::Words => words(v),
            Problem::Grid => grid(v),
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn basic<R: BufRead, W: Write>(v: &mut Validator<R, W>) -> GrammarResult {
    v.read_integer_between::<i32>(1, 50, "")?;
    v.read_end_of_file()
}

fn intervals<R: BufRead, W: Write>(v: &mut Validator<R, W>) -> GrammarResult {
    let n: usize = v.read_integer_between(1, 1000, "")?;
    v.read_end_of_line()?;
    for _ in 0..n {
        v.read_interval_between::<i64>(1, 1_000_000_000, "")?;
        v.read_end_of_line()?;
    }
    v.read_end_of_file()
}

fn words<R: BufRead, W: Write>(v: &mut Validator<R, W>) -> GrammarResult {
    let n: usize = v.read_integer_between(1, 100, "")?;
    v.read_end_of_line()?;
    for _ in 0..n {
        v.read_string_between(1, 20, &CharClass::LOWERCASE, "")?;
        v.read_end_of_line()?;
    }
    v.read_end_of_file()
}

fn grid<R: BufRead, W: Write>(v: &mut Validator<R, W>) -> GrammarResult {
    let rows: usize = v.read_integer_between(1, 50, "")?;
    v.read_space()?;
    let cols: usize = v.read_integer_between(1, 50, "")?;
    v.read_end_of_line()?;
    for _ in 0..rows {
        for _ in 0..cols {
            v.read_char_matching(&GRID_CELLS, "")?;
        }
        v.read_end_of_line()?;
    }
    v.read_end_of_file()
}
