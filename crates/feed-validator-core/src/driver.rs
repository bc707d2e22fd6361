//! Validation driver
//!
//! Streams a feed through the line reassembler, decodes each logical line as
//! JSON, validates it against a checker tree and aggregates the findings in
//! input order. The run stops early once the configured error budget is
//! spent, and for good on an encoding or read failure.

use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::checker::Checker;
use crate::config::ValidatorConfig;
use crate::error::{FeedError, Result};
use crate::reader::logical_lines;
use crate::violation::Outcome;

/// A warning tied to the logical line it was found on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineWarning {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for LineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: warning - {}", self.line, self.message)
    }
}

/// Aggregate result of validating a feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedReport {
    /// One message per failing line, in input order
    pub errors: Vec<String>,
    pub warnings: Vec<LineWarning>,
    /// Logical lines actually examined
    pub lines_processed: usize,
    /// Whether the error budget ended the run before the end of input
    pub stopped_early: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl FeedReport {
    /// A feed is valid when no errors were found
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Validates every record of a feed against one checker tree
pub struct FeedValidator<'a> {
    schema: &'a Checker,
    config: ValidatorConfig,
}

impl<'a> FeedValidator<'a> {
    pub fn new(schema: &'a Checker, config: ValidatorConfig) -> Self {
        Self { schema, config }
    }

    /// Open `path` and validate its contents.
    ///
    /// Failing to open the file is the only error returned; everything found
    /// while reading is recorded in the report.
    pub fn validate_path(&self, path: &Path) -> Result<FeedReport> {
        let file = File::open(path).map_err(|e| {
            FeedError::file_error(format!(
                "Can't open file: \"{}\" for reason: {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %path.display(), "Validating feed file");
        Ok(self.validate_reader(BufReader::new(file)))
    }

    /// Validate every logical line of `reader`
    pub fn validate_reader<R: BufRead>(&self, reader: R) -> FeedReport {
        let start = Instant::now();
        let mut report = FeedReport::default();

        for (index, line) in logical_lines(reader).enumerate() {
            let line_no = index + 1;

            if self.config.budget_exhausted(report.errors.len()) {
                tracing::warn!(
                    errors = report.errors.len(),
                    line = line_no,
                    "Error limit reached, remaining lines not checked"
                );
                report.stopped_early = true;
                break;
            }

            match line {
                Ok(text) => {
                    self.validate_line(line_no, &text, &mut report);
                    report.lines_processed = line_no;
                }
                Err(FeedError::Encoding(reason)) => {
                    report.errors.push(format!(
                        "Line {}: Found invalid UTF-8 characters.  Check the encoding of the input file: {}",
                        line_no, reason
                    ));
                    break;
                }
                Err(FeedError::FileError(reason)) => {
                    report
                        .errors
                        .push(format!("Line {}: Failed to read input: {}", line_no, reason));
                    break;
                }
                Err(e) => {
                    report
                        .errors
                        .push(format!("Line {}: Failed to read input: {}", line_no, e));
                    break;
                }
            }

            if self.config.progress_interval > 0 && line_no % self.config.progress_interval == 0 {
                tracing::info!("Processed {} lines", line_no);
            }
        }

        report.duration_ms = Some(start.elapsed().as_millis() as u64);
        tracing::info!(
            lines = report.lines_processed,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            stopped_early = report.stopped_early,
            "Feed validation finished"
        );
        report
    }

    /// Decode and check a single logical line, appending findings to `report`
    fn validate_line(&self, line_no: usize, text: &str, report: &mut FeedReport) {
        let candidate: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                report
                    .errors
                    .push(format!("Line {}: Found invalid JSON: {}", line_no, e));
                return;
            }
        };

        let outcome = self.schema.validate(&candidate, true);
        tracing::debug!(
            line = line_no,
            errors = outcome.errors.len(),
            warnings = outcome.warnings.len(),
            "Validated record"
        );
        record_outcome(line_no, outcome, report);
    }
}

fn record_outcome(line_no: usize, outcome: Outcome, report: &mut FeedReport) {
    if outcome.has_errors() {
        let details = outcome.error_messages().join("\n\t");
        report.errors.push(format!(
            "Line {}: Found valid JSON which does not match expected schema:\n\t{}",
            line_no, details
        ));
    }

    for notice in outcome.warnings {
        let warning = LineWarning {
            line: line_no,
            message: notice.to_string(),
        };
        tracing::debug!("{}", warning);
        report.warnings.push(warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::Field;
    use std::io::Cursor;

    fn artist() -> Checker {
        Checker::composite(
            vec![Field::text("id"), Field::text("name")],
            vec![],
            vec![Field::boolean("published")],
        )
        .unwrap()
    }

    fn run(config: ValidatorConfig, input: &str) -> FeedReport {
        let schema = artist();
        FeedValidator::new(&schema, config).validate_reader(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn test_valid_feed() {
        let report = run(
            ValidatorConfig::new(),
            "{\"id\":\"A1\",\"name\":\"One\"}\n{\"id\":\"A2\",\"name\":\"Two\"}\n",
        );
        assert!(report.is_valid());
        assert_eq!(report.lines_processed, 2);
        assert!(!report.stopped_early);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let report = run(ValidatorConfig::new(), "");
        assert_eq!(report.lines_processed, 0);
        assert!(report.is_valid());
    }

    #[test]
    fn test_schema_errors_are_aggregated_per_line() {
        let report = run(ValidatorConfig::new(), "{\"name\":1}\n");
        assert_eq!(
            report.errors,
            vec![concat!(
                "Line 1: Found valid JSON which does not match expected schema:",
                "\n\tDid not find required field \"id\"",
                "\n\tField \"name\" had incorrect type. Expected: \"string\" but found: \"integer\""
            )]
        );
    }

    #[test]
    fn test_invalid_json_is_recorded_and_skipped() {
        let report = run(ValidatorConfig::new(), "{not json\n{\"id\":\"A\",\"name\":\"B\"}\n");
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Line 1: Found invalid JSON: "));
        assert_eq!(report.lines_processed, 2);
    }

    #[test]
    fn test_warnings_carry_line_numbers() {
        let report = run(
            ValidatorConfig::new(),
            "{\"id\":\"A\",\"name\":\"B\"}\n{\"id\":\"A1\",\"name\":\"\",\"published\":true}\n",
        );
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            report.warnings[0].to_string(),
            "line 2: warning - \"name\" was required, but found an invalid entry of \"\""
        );
    }

    #[test]
    fn test_budget_stops_before_next_line() {
        let input = "x\ny\nz\n{\"id\":\"A\",\"name\":\"B\"}\n";
        let report = run(ValidatorConfig::new().with_max_errors(Some(2)), input);
        assert_eq!(report.errors.len(), 2);
        assert!(report.stopped_early);
        assert_eq!(report.lines_processed, 2);
    }

    #[test]
    fn test_budget_reached_on_last_line_is_not_early() {
        let report = run(ValidatorConfig::new().with_max_errors(Some(2)), "x\ny\n");
        assert_eq!(report.errors.len(), 2);
        assert!(!report.stopped_early);
        assert_eq!(report.lines_processed, 2);
    }

    #[test]
    fn test_unlimited_budget_reports_everything() {
        let input = "x\n".repeat(5);
        let report = run(ValidatorConfig::new().with_max_errors_arg(-1), &input);
        assert_eq!(report.errors.len(), 5);
        assert!(!report.stopped_early);
    }

    #[test]
    fn test_encoding_error_is_fatal() {
        let schema = artist();
        let mut input = b"{\"id\":\"A\",\"name\":\"B\"}\n".to_vec();
        input.extend_from_slice(&[b'{', 0xc3, 0x28, b'}', b'\n']);
        input.extend_from_slice(b"{\"id\":\"C\",\"name\":\"D\"}\n");

        let report =
            FeedValidator::new(&schema, ValidatorConfig::new()).validate_reader(Cursor::new(input));
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with(
            "Line 2: Found invalid UTF-8 characters.  Check the encoding of the input file: "
        ));
        assert_eq!(report.lines_processed, 1);
        assert!(!report.stopped_early);
    }

    /// Reader that fails on every call, chained after readable content
    struct FailingRead;

    impl std::io::Read for FailingRead {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device unplugged"))
        }
    }

    #[test]
    fn test_read_failure_is_fatal() {
        use std::io::Read;

        let schema = artist();
        let good = Cursor::new(b"{\"id\":\"A\",\"name\":\"B\"}\nnot json\n".to_vec());
        let reader = BufReader::new(good.chain(FailingRead));

        let report = FeedValidator::new(&schema, ValidatorConfig::new()).validate_reader(reader);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors[0].starts_with("Line 2: Found invalid JSON: "));
        assert_eq!(report.errors[1], "Line 3: Failed to read input: device unplugged");
        assert_eq!(report.lines_processed, 2);
        assert!(!report.stopped_early);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let schema = artist();
        let err = FeedValidator::new(&schema, ValidatorConfig::new())
            .validate_path(Path::new("/definitely/not/here.json"))
            .unwrap_err();
        assert!(matches!(err, FeedError::FileError(_)));
        assert!(err.to_string().contains("Can't open file"));
    }
}
