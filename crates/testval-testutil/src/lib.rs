//! Test utilities for testval.
//!
//! Provides the parser and runner for the validation case-file format used
//! by `tests/problems/*.test`: named inputs with the verdict and sink output
//! a grammar is expected to produce.

pub mod cases;

use std::fmt;

/// Outcome of one validation case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    /// Verdict and sink output matched.
    Pass,
    /// Verdict or sink output differed from the case file.
    Fail { expected: String, actual: String },
    /// The case carried a `# skip:` header and was not run.
    Skip { reason: String },
    /// The grammar faulted instead of producing a verdict.
    Error { message: String },
}

impl TestResult {
    pub fn is_fail(&self) -> bool {
        matches!(self, TestResult::Fail { .. })
    }

    /// Fails and faults; these are listed in the summary.
    fn is_problem(&self) -> bool {
        matches!(self, TestResult::Fail { .. } | TestResult::Error { .. })
    }
}

/// Tally of a case-file run.
#[derive(Debug, Default)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Every failed or faulted case, in file order.
    pub failures: Vec<TestFailure>,
}

/// A failed or faulted case with its location in the case file.
#[derive(Debug, Clone)]
pub struct TestFailure {
    pub name: String,
    pub line: usize,
    pub result: TestResult,
}

impl TestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, line: usize, result: TestResult) {
        let counter = match &result {
            TestResult::Pass => &mut self.passed,
            TestResult::Fail { .. } => &mut self.failed,
            TestResult::Skip { .. } => &mut self.skipped,
            TestResult::Error { .. } => &mut self.errors,
        };
        *counter += 1;
        if result.is_problem() {
            self.failures.push(TestFailure {
                name: name.into(),
                line,
                result,
            });
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped + self.errors
    }

    /// No case failed or faulted. Skipped cases don't count against this.
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for TestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "═".repeat(60);
        writeln!(f, "\n{rule}")?;
        writeln!(
            f,
            "{} cases: {} passed, {} failed, {} skipped, {} faulted",
            self.total(),
            self.passed,
            self.failed,
            self.skipped,
            self.errors
        )?;

        for failure in &self.failures {
            write!(f, "\n  {} (line {}): ", failure.name, failure.line)?;
            match &failure.result {
                TestResult::Fail { expected, actual } => {
                    writeln!(f, "mismatch")?;
                    writeln!(f, "    expected: {expected:?}")?;
                    writeln!(f, "    actual:   {actual:?}")?;
                }
                TestResult::Error { message } => writeln!(f, "fault: {message}")?,
                TestResult::Pass | TestResult::Skip { .. } => writeln!(f)?,
            }
        }
        writeln!(f, "{rule}")
    }
}
