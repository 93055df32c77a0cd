//! testval command-line driver.
//!
//! ```bash
//! testval list
//! testval check intervals --input tests/1.in
//! testval check basic --require-eof < input.txt
//! ```
//!
//! Diagnostics and the success marker go to stdout. Exit status is 0 when
//! the input validates, 1 when it is rejected, 2 on any internal fault.

pub mod config;
pub mod problems;

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use testval_kernel::{run, Verdict};
use tracing_subscriber::EnvFilter;

pub use config::{CliConfig, ConfigError};
pub use problems::Problem;

/// Exit status for a validated input (and for `list`).
pub const EXIT_VALIDATED: u8 = 0;
/// Exit status for a rejected input.
pub const EXIT_REJECTED: u8 = 1;
/// Exit status for an internal fault.
pub const EXIT_FAULT: u8 = 2;

/// Log filter used when `RUST_LOG` is unset or empty.
pub const DEFAULT_LOG_FILTER: &str = "testval=warn";

/// Build the log filter from a `RUST_LOG` value.
///
/// The user's directives replace the default entirely; an unparsable value
/// falls back to the default.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[derive(Debug, Parser)]
#[command(name = "testval", version, about = "Fail-fast validators for judge input files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate an input file against a built-in problem.
    Check {
        /// Problem grammar to validate against.
        #[arg(value_enum)]
        problem: Problem,

        /// Input file (default: stdin).
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Config file (default: $XDG_CONFIG_HOME/testval/config.toml).
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Reject runs whose grammar never read end of file.
        #[arg(long)]
        require_eof: bool,
    },

    /// List the built-in problems.
    List,
}

/// Execute a parsed command line, returning the exit status.
///
/// `stdin` is only read by `check` without `--input`.
pub fn execute(cli: Cli, stdin: impl BufRead, stdout: impl Write) -> Result<u8> {
    match cli.command {
        Command::Check {
            problem,
            input,
            config,
            require_eof,
        } => {
            let mut settings = CliConfig::load(config.as_deref())?.validator;
            if require_eof {
                settings.require_end_of_file = true;
            }
            tracing::debug!(%problem, input = ?input, "checking input");

            let verdict = match input {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("failed to open input {}", path.display()))?;
                    run(BufReader::new(file), stdout, settings, |v| problem.validate(v))
                }
                None => run(stdin, stdout, settings, |v| problem.validate(v)),
            }
            .with_context(|| format!("validator for {problem} faulted"))?;

            Ok(exit_code(&verdict))
        }
        Command::List => {
            list(stdout)?;
            Ok(EXIT_VALIDATED)
        }
    }
}

/// Exit status for a verdict.
pub fn exit_code(verdict: &Verdict) -> u8 {
    match verdict {
        Verdict::Validated => EXIT_VALIDATED,
        Verdict::Rejected { .. } => EXIT_REJECTED,
    }
}

fn list(mut out: impl Write) -> Result<()> {
    for problem in Problem::ALL {
        writeln!(out, "{:<10} {}", problem.name(), problem.description())?;
    }
    out.flush()?;
    Ok(())
}
