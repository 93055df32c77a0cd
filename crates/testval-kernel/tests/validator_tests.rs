//! End-to-end validation runs: grammar in, sink text and verdict out.

use std::io::{BufRead, Write};

use rstest::rstest;
use testval_kernel::{run, CharClass, ErrorKind, Validator, ValidatorConfig, ValidatorError, Verdict};

/// Run the sample grammar "one integer in [1, 50], then EOF".
fn run_basic(input: &str) -> (Verdict, String) {
    let mut out = Vec::new();
    let verdict = run(input.as_bytes(), &mut out, ValidatorConfig::default(), |v| {
        v.read_integer_between::<i32>(1, 50, "")?;
        v.read_end_of_file()
    })
    .expect("no internal fault");
    (verdict, String::from_utf8(out).expect("utf-8 sink"))
}

// ============================================================================
// Success marker
// ============================================================================

#[test]
fn basic_grammar_validates_and_marks_once() {
    let (verdict, out) = run_basic("7");
    assert_eq!(verdict, Verdict::Validated);
    assert_eq!(out, "VALIDATED\n");
    assert_eq!(out.matches("VALIDATED").count(), 1);
}

#[test]
fn trailing_newline_is_not_end_of_file() {
    let (verdict, out) = run_basic("7\n");
    assert_eq!(verdict, Verdict::Rejected { error_count: 1 });
    insta::assert_snapshot!(out.trim_end(), @r"
    Line 1, Token 1
    Error: Expected end of file.
    ");
}

// ============================================================================
// Rejection determinism
// ============================================================================

#[test]
fn out_of_range_reports_once_and_never_marks() {
    let (verdict, out) = run_basic("999");
    assert_eq!(verdict, Verdict::Rejected { error_count: 1 });
    assert!(!out.contains("VALIDATED"));
    assert_eq!(out.matches("Error:").count(), 1);
    insta::assert_snapshot!(out.trim_end(), @r"
    Line 1, Token 1
    Error: Number out of bounds.
    ");
}

#[test]
fn rejection_output_ends_with_blank_separator() {
    let (_, out) = run_basic("0");
    assert!(out.ends_with("Error: Number out of bounds.\n\n"));
}

#[rstest]
#[case::letters("abc", "Integer read failed.")]
#[case::sign_only("-", "Integer read failed.")]
#[case::empty("", "Integer read failed.")]
#[case::too_big("999", "Number out of bounds.")]
#[case::zero("0", "Number out of bounds.")]
#[case::negative("-3", "Number out of bounds.")]
#[case::overflow("99999999999", "Integer read failed.")]
#[case::leading_space(" 7", "Integer read failed.")]
#[case::trailing_junk("7x", "Expected end of file.")]
fn basic_grammar_rejections(#[case] input: &str, #[case] message: &str) {
    let (verdict, out) = run_basic(input);
    assert!(!verdict.is_validated(), "{input:?} should be rejected");
    assert!(
        out.contains(&format!("Error: {message}")),
        "{input:?}: expected {message:?}, got {out:?}"
    );
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn error_position_on_later_line() {
    let mut out = Vec::new();
    let verdict = run(&b"2\n1 2\n3 x\n"[..], &mut out, ValidatorConfig::default(), |v| {
        let n: usize = v.read_integer_between(1, 10, "")?;
        v.read_end_of_line()?;
        for _ in 0..n {
            v.read_integers_between::<i32>(2, 0, 9, "")?;
            v.read_end_of_line()?;
        }
        v.read_end_of_file()
    })
    .unwrap();
    assert_eq!(verdict, Verdict::Rejected { error_count: 1 });
    insta::assert_snapshot!(String::from_utf8(out).unwrap().trim_end(), @r"
    Line 3, Token 1
    Error: Integer read failed.
    ");
}

#[test]
fn missing_line_reports_stream_exhausted() {
    let mut v = Validator::new(&b"1\n"[..], Vec::new());
    v.read_integer::<u8>().unwrap();
    v.read_end_of_line().unwrap();
    let err = v.read_integer::<u8>().unwrap_err();
    let rejection = err.rejection().unwrap();
    assert_eq!(rejection.kind, ErrorKind::StreamExhausted);
    assert_eq!(rejection.message, "Integer read failed.");
    assert_eq!(rejection.position.line, 1);

    let mut v = Validator::new(&b"1\n"[..], Vec::new());
    v.read_integer::<u8>().unwrap();
    v.read_end_of_line().unwrap();
    let err = v.read_char().unwrap_err();
    let rejection = err.rejection().unwrap();
    assert_eq!(rejection.kind, ErrorKind::StreamExhausted);
    assert_eq!(rejection.position.line, 2);
}

// ============================================================================
// Driver-level behaviour
// ============================================================================

#[test]
fn rejection_and_fault_are_distinguishable() {
    let mut out = Vec::new();
    let rejected = run(&b"x"[..], &mut out, ValidatorConfig::default(), |v| {
        v.read_integer::<i32>()?;
        Ok(())
    });
    assert!(matches!(rejected, Ok(Verdict::Rejected { .. })));

    let mut out = Vec::new();
    let faulted = run(&b"x"[..], &mut out, ValidatorConfig::default(), |v| {
        v.read_string_between(5, 1, &CharClass::LETTERS, "")?;
        Ok(())
    });
    assert!(matches!(faulted, Err(ValidatorError::InvalidArgument(_))));
}

const GRID_CELLS: CharClass = CharClass::from_bytes(b".#");

/// `R C`, then `R` rows of `C` cells from `.#`.
fn grid_grammar<R: BufRead, W: Write>(v: &mut Validator<R, W>) -> Result<(), ValidatorError> {
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

#[test]
fn grid_grammar_accepts_and_rejects() {
    let mut out = Vec::new();
    let ok = run(&b"2 3\n.#.\n##.\n"[..], &mut out, ValidatorConfig::default(), grid_grammar);
    assert_eq!(ok.unwrap(), Verdict::Validated);

    let mut out = Vec::new();
    let bad = run(&b"2 3\n.#.\n#x.\n"[..], &mut out, ValidatorConfig::default(), grid_grammar);
    assert_eq!(bad.unwrap(), Verdict::Rejected { error_count: 1 });
    insta::assert_snapshot!(String::from_utf8(out).unwrap().trim_end(), @r"
    Line 3, Token 1
    Error: Character doesn't match character class.
    ");
}
