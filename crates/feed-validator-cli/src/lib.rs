//! Feed Validator CLI
//!
//! Command-line front end for `feed-validator-core`: parses arguments, runs
//! the validation driver over a feed file and renders the report.
//!
//! ```bash
//! # Validate a track feed, reporting at most 50 errors
//! feed-validate tracks.json track -m 50
//!
//! # Report every error as JSON
//! feed-validate artists.json artist --max_errors -1 --format json
//! ```

pub mod commands;
pub mod output;

pub use commands::{build_command, FeedType, FeedValidatorCli};
pub use output::{FeedSummary, OutputFormat};

use feed_validator_core::FeedError;

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every line passed; warnings may still have been reported
    Success = 0,
    /// At least one error was found
    ValidationError = 1,
    /// Invalid input or unreadable file
    InvalidInput = 3,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from the validity of a report
    pub fn from_report(valid: bool) -> Self {
        if valid {
            ExitCode::Success
        } else {
            ExitCode::ValidationError
        }
    }
}

/// Log level selected by the verbosity flags
pub fn log_level(verbose: u8, quiet: bool) -> tracing::Level {
    if quiet {
        return tracing::Level::ERROR;
    }
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Run the CLI and map failures to exit codes
pub fn run_cli(cli: FeedValidatorCli) -> ExitCode {
    match commands::execute_validate(&cli) {
        Ok(code) => code,
        Err(e) => report_failure(&e),
    }
}

fn report_failure(e: &FeedError) -> ExitCode {
    eprintln!("Error: {}", e);
    if e.is_user_error() {
        eprintln!("\nFor more information, try '--help'.");
        ExitCode::InvalidInput
    } else {
        ExitCode::InternalError
    }
}
