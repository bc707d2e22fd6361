//! CLI command definitions for the feed validator
//!
//! Provides the Clap-based argument surface and the validate command.

use clap::{CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

use feed_validator_core::{FeedError, FeedValidator, RecordKind, ValidatorConfig};

use super::output::{FeedSummary, OutputFormat};
use super::ExitCode;

/// Check that a feed file matches the format expected by catalog ingestion.
///
/// The expected format is a UTF-8 encoded file containing one JSON-encoded
/// record per line, where each line carries the expected set of fields for
/// its record type.
#[derive(Parser, Debug)]
#[command(name = "feed-validate")]
#[command(about = "Validate newline-delimited catalog feeds before submission")]
#[command(version)]
pub struct FeedValidatorCli {
    /// Name of the file containing the JSON records to validate
    #[arg(value_name = "FILENAME")]
    pub filename: PathBuf,

    /// Kind of record the file contains
    #[arg(value_name = "TYPE", value_enum)]
    pub record_type: FeedType,

    /// Maximum number of errors to report
    ///
    /// Passing -1 reports all errors.
    #[arg(
        short = 'm',
        long = "max_errors",
        visible_alias = "max-errors",
        env = "FEED_VALIDATOR_MAX_ERRORS",
        default_value_t = 1000,
        allow_negative_numbers = true
    )]
    pub max_errors: i64,

    /// Output format for the report
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Record types accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum FeedType {
    /// One artist per line
    Artist,
    /// One track per line
    Track,
}

impl From<FeedType> for RecordKind {
    fn from(value: FeedType) -> Self {
        match value {
            FeedType::Artist => RecordKind::Artist,
            FeedType::Track => RecordKind::Track,
        }
    }
}

/// Long help text describing the fields of every record type
pub fn schema_help() -> String {
    let mut help = String::new();
    for kind in [RecordKind::Track, RecordKind::Artist] {
        let rendered = match kind.schema() {
            Ok(schema) => schema.to_string(),
            Err(e) => format!("\n    <unavailable: {}>", e),
        };
        help.push_str(&format!(
            "The expected and required fields for \"{}\" are as follows:{}\n\n",
            kind, rendered
        ));
    }
    help.trim_end().to_string()
}

/// Clap command with the record schemas appended to `--help`
pub fn build_command() -> clap::Command {
    FeedValidatorCli::command().after_long_help(schema_help())
}

/// Execute the validate command
pub fn execute_validate(cli: &FeedValidatorCli) -> Result<ExitCode, FeedError> {
    let kind = RecordKind::from(cli.record_type);
    let schema = kind.schema()?;
    let config = ValidatorConfig::new().with_max_errors_arg(cli.max_errors);

    tracing::info!(
        file = %cli.filename.display(),
        record_type = %kind,
        max_errors = ?config.max_errors,
        "Validating feed"
    );

    let report = FeedValidator::new(&schema, config).validate_path(&cli.filename)?;

    let summary = FeedSummary::from_report(kind, &report);
    summary.render(cli.format)?;

    Ok(ExitCode::from_report(report.is_valid()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::FromArgMatches;

    fn parse(args: &[&str]) -> FeedValidatorCli {
        let matches = build_command().try_get_matches_from(args).unwrap();
        FeedValidatorCli::from_arg_matches(&matches).unwrap()
    }

    #[test]
    fn test_parse_positional_args() {
        let cli = parse(&["feed-validate", "tracks.json", "track"]);
        assert_eq!(cli.filename, PathBuf::from("tracks.json"));
        assert_eq!(cli.record_type, FeedType::Track);
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_parse_max_errors() {
        let cli = parse(&["feed-validate", "a.json", "artist", "-m", "-1"]);
        assert_eq!(cli.max_errors, -1);

        let cli = parse(&["feed-validate", "a.json", "artist", "--max_errors", "25"]);
        assert_eq!(cli.max_errors, 25);

        let cli = parse(&["feed-validate", "a.json", "artist", "--max-errors", "7"]);
        assert_eq!(cli.max_errors, 7);
    }

    #[test]
    fn test_rejects_unknown_type_and_missing_args() {
        assert!(build_command()
            .try_get_matches_from(["feed-validate", "a.json", "album"])
            .is_err());
        assert!(build_command()
            .try_get_matches_from(["feed-validate", "a.json"])
            .is_err());
    }

    #[test]
    fn test_schema_help_describes_both_types() {
        let help = schema_help();
        assert!(help.contains("fields for \"track\""));
        assert!(help.contains("fields for \"artist\""));
        assert!(help.contains("\"ISRC\": type \"string\", optional"));
    }

    #[test]
    fn test_command_definition_is_consistent() {
        build_command().debug_assert();
    }
}
