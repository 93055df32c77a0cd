//! Validation case-file parser and runner.
//!
//! Parses the `tests/problems/*.test` format:
//!
//! ```text
//! # test: too_big
//! # expect: rejected
//! ---
//! 999
//! ---
//! Line 1, Token 1
//! Error: Number out of bounds.
//! ===
//! ```
//!
//! Input lines are joined with `\n` and carry no final newline unless the
//! header includes `# trailing-newline`. A `# skip: <reason>` header keeps
//! the case in the file without running it. The expected block is compared with
//! the sink output, both trimmed; an empty block checks the verdict only.

use testval_kernel::{run, Validator, ValidatorConfig, ValidatorError, Verdict};

use crate::{TestResult, TestSummary};

/// The validator type a case grammar runs against.
pub type CaseValidator<'a, 'b> = Validator<&'a [u8], &'b mut Vec<u8>>;

/// A single validation test case.
#[derive(Debug, Clone)]
pub struct ValidationCase {
    /// Test name from the `# test: name` line.
    pub name: String,
    /// Line number where the test starts (1-indexed).
    pub line_number: usize,
    /// The raw input bytes fed to the grammar.
    pub input: String,
    /// The verdict we expect.
    pub expect: Expectation,
    /// Expected sink output, trimmed. Empty means "don't compare".
    pub output: String,
    /// Reason from a `# skip:` header.
    pub skip: Option<String>,
}

/// Expected verdict of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Validated,
    Rejected,
}

impl Expectation {
    fn matches(self, verdict: &Verdict) -> bool {
        match self {
            Expectation::Validated => verdict.is_validated(),
            Expectation::Rejected => !verdict.is_validated(),
        }
    }
}

/// Parse the *.test file format into cases.
pub fn parse_case_tests(content: &str) -> Vec<ValidationCase> {
    let mut cases = Vec::new();
    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let Some(name) = lines[i].trim().strip_prefix("# test:") else {
            i += 1;
            continue;
        };
        let name = name.trim().to_string();
        let line_number = i + 1;
        i += 1;

        // Header directives until the first ---
        let mut expect = Expectation::Validated;
        let mut trailing_newline = false;
        let mut skip = None;
        while i < lines.len() && lines[i].trim() != "---" {
            let header = lines[i].trim();
            if let Some(value) = header.strip_prefix("# expect:") {
                if value.trim() == "rejected" {
                    expect = Expectation::Rejected;
                }
            } else if header == "# trailing-newline" {
                trailing_newline = true;
            } else if let Some(reason) = header.strip_prefix("# skip:") {
                skip = Some(reason.trim().to_string());
            }
            i += 1;
        }
        i += 1; // skip the ---

        let mut input_lines = Vec::new();
        while i < lines.len() && lines[i].trim() != "---" {
            input_lines.push(lines[i]);
            i += 1;
        }
        i += 1; // skip the ---

        let mut output_lines = Vec::new();
        while i < lines.len() && lines[i].trim() != "===" {
            output_lines.push(lines[i]);
            i += 1;
        }
        i += 1; // skip the ===

        let mut input = input_lines.join("\n");
        if trailing_newline {
            input.push('\n');
        }

        cases.push(ValidationCase {
            name,
            line_number,
            input,
            expect,
            output: output_lines.join("\n").trim().to_string(),
            skip,
        });
    }

    cases
}

impl ValidationCase {
    /// Run this case through `grammar` with the default configuration.
    pub fn run<F>(&self, grammar: F) -> TestResult
    where
        F: FnOnce(&mut CaseValidator<'_, '_>) -> Result<(), ValidatorError>,
    {
        if let Some(reason) = &self.skip {
            return TestResult::Skip {
                reason: reason.clone(),
            };
        }

        let mut out = Vec::new();
        let verdict = match run(self.input.as_bytes(), &mut out, ValidatorConfig::default(), grammar) {
            Ok(verdict) => verdict,
            Err(e) => {
                return TestResult::Error {
                    message: e.to_string(),
                };
            }
        };
        let actual = String::from_utf8_lossy(&out).trim().to_string();

        if !self.expect.matches(&verdict) {
            return TestResult::Fail {
                expected: format!("{:?}", self.expect).to_lowercase(),
                actual: format!("{verdict}: {actual}"),
            };
        }
        if !self.output.is_empty() && self.output != actual {
            return TestResult::Fail {
                expected: self.output.clone(),
                actual,
            };
        }
        TestResult::Pass
    }
}

/// Run all cases through `grammar` and return a summary.
pub fn run_case_tests<F>(cases: &[ValidationCase], grammar: F) -> TestSummary
where
    F: Fn(&mut CaseValidator<'_, '_>) -> Result<(), ValidatorError>,
{
    let mut summary = TestSummary::new();

    for case in cases {
        let result = case.run(&grammar);
        summary.record(&case.name, case.line_number, result);
    }

    summary
}
