//! testval entry point.
//!
//! ```bash
//! RUST_LOG=testval=debug testval check grid --input 01.in
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*};

use testval_cli::{execute, log_filter, Cli, EXIT_FAULT};

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("testval: {e:#}");
            ExitCode::from(EXIT_FAULT)
        }
    }
}

fn try_main() -> Result<u8> {
    // Logs go to stderr; stdout carries only validator output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .init();

    let cli = Cli::parse();
    execute(cli, std::io::stdin().lock(), std::io::stdout().lock())
}
