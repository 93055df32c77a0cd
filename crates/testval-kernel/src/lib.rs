//! testval-kernel: the core of testval.
//!
//! This crate provides:
//!
//! - **Cursor**: byte lookahead/consumption with line and token bookkeeping
//! - **Scanner**: overflow-safe integer scanning, generic over integer width
//! - **CharClass**: fixed byte sets used as membership tests
//! - **Validator**: typed reads, constraint checks, fail-fast reporting, and
//!   the terminal `VALIDATED` / rejected verdict
//!
//! # Example
//!
//! ```
//! use testval_kernel::{run, ValidatorConfig, Verdict};
//!
//! let mut out = Vec::new();
//! let verdict = run(&b"7"[..], &mut out, ValidatorConfig::default(), |v| {
//!     v.read_integer_between::<i32>(1, 50, "")?;
//!     v.read_end_of_file()
//! })?;
//!
//! assert_eq!(verdict, Verdict::Validated);
//! assert_eq!(out, b"VALIDATED\n");
//! # Ok::<(), testval_kernel::ValidatorError>(())
//! ```

pub mod char_class;
pub mod config;
pub mod cursor;
pub mod error;
pub mod scanner;
pub mod validator;
pub mod verdict;

pub use char_class::CharClass;
pub use config::ValidatorConfig;
pub use cursor::{is_space, CharacterCursor, Position};
pub use error::{ErrorKind, Rejection, ValidatorError};
pub use scanner::{scan_integer, ScanInt};
pub use validator::{run, Validator};
pub use verdict::Verdict;
