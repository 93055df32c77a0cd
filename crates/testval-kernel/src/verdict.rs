//! Terminal outcome of a validation run.

use std::fmt;

/// How a finished run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Verdict {
    /// No errors; the success marker was written.
    Validated,
    /// At least one error was reported. Fail-fast keeps this at 1 in practice.
    Rejected { error_count: usize },
}

impl Verdict {
    pub fn is_validated(&self) -> bool {
        matches!(self, Verdict::Validated)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Validated => write!(f, "validated"),
            Verdict::Rejected { error_count } => write!(f, "rejected ({error_count} error(s))"),
        }
    }
}
