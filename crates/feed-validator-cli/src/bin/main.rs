//! Feed Validator CLI
//!
//! # Usage
//!
//! ```bash
//! feed-validate <FILENAME> <TYPE> [--max_errors N] [--format table|json|yaml]
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - every line is valid (warnings allowed)
//! - 1: Errors were found
//! - 2: Malformed command line
//! - 3: Invalid input or unreadable file
//! - 10: Internal error

use clap::FromArgMatches;
use feed_validator_cli::{build_command, log_level, run_cli, FeedValidatorCli};

fn main() {
    // Parse CLI arguments; the long help lists every record schema
    let matches = build_command().get_matches();
    let cli = FeedValidatorCli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(log_level(cli.verbose, cli.quiet).into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Run the CLI and exit with appropriate code
    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
