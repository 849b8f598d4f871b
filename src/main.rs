//! Tag Input CLI
//!
//! Reads lines from stdin and drives a tag input: plain lines are submitted,
//! `:`-prefixed lines are commands (`:rm`, `:set`, `:clear`, `:disable`,
//! `:enable`, `:list`, `:html`, `:quit`).

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;

mod cli;

/// Tag Input CLI entry point
pub fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging may not be initialized when configuration fails"
            )]
            {
                eprintln!("{error}");
            }

            ExitCode::FAILURE
        }
    }
}
