//! Output formatting for the feed validator CLI
//!
//! Renders a feed report as a human-readable listing (with colors) or as JSON
//! or YAML for machine processing.

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

use feed_validator_core::{FeedError, FeedReport, RecordKind};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable listing with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Notice printed when the error budget ended the run
pub const LIMIT_REACHED_NOTICE: &str = concat!(
    "*** WARNING ***: Error limit reached.  Did not check all lines.  ",
    "See usage to increase number of reported errors"
);

/// Notice printed when no errors were found
pub const VALID_NOTICE: &str = "File is valid to send for ingestion";

/// Report structure for rendering
#[derive(Debug, Clone, Serialize)]
pub struct FeedSummary {
    /// Overall validation status
    pub valid: bool,
    /// Record type the feed was checked against
    pub record_type: RecordKind,
    /// Number of lines examined
    pub lines_checked: usize,
    pub error_count: usize,
    pub warning_count: usize,
    /// Whether the error limit ended the run early
    pub stopped_early: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Summary message
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl FeedSummary {
    /// Create output from a feed report
    pub fn from_report(record_type: RecordKind, report: &FeedReport) -> Self {
        Self {
            valid: report.is_valid(),
            record_type,
            lines_checked: report.lines_processed,
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            stopped_early: report.stopped_early,
            errors: report.errors.clone(),
            warnings: report.warnings.iter().map(ToString::to_string).collect(),
            summary: summary_line(
                report.lines_processed,
                report.error_count(),
                report.warning_count(),
            ),
            duration_ms: report.duration_ms,
        }
    }

    /// Render output in the specified format
    pub fn render(&self, format: OutputFormat) -> Result<(), FeedError> {
        match format {
            OutputFormat::Json => self.render_json(),
            OutputFormat::Yaml => self.render_yaml(),
            OutputFormat::Table => self
                .render_table(&mut io::stdout().lock())
                .map_err(FeedError::from),
        }
    }

    fn render_json(&self) -> Result<(), FeedError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| FeedError::serialization(e.to_string()))?;
        println!("{}", json);
        Ok(())
    }

    fn render_yaml(&self) -> Result<(), FeedError> {
        let yaml =
            serde_yaml::to_string(self).map_err(|e| FeedError::serialization(e.to_string()))?;
        println!("{}", yaml);
        Ok(())
    }

    /// Render as a human-readable listing
    pub fn render_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for warning in &self.warnings {
            writeln!(out, "{}", warning.yellow())?;
        }
        for error in &self.errors {
            writeln!(out, "{}", error.red())?;
        }

        if self.stopped_early {
            writeln!(out)?;
            writeln!(out, "{}", LIMIT_REACHED_NOTICE.yellow().bold())?;
        }

        writeln!(out)?;
        writeln!(out, "{}", self.summary)?;

        if self.valid {
            writeln!(out)?;
            writeln!(out, "{}", VALID_NOTICE.green().bold())?;
        }
        writeln!(out)?;
        Ok(())
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// One-line summary of a run, e.g.
/// `Checked 3 lines, found errors on 2 lines and found warning on 1 line`
pub fn summary_line(lines: usize, errors: usize, warnings: usize) -> String {
    format!(
        "Checked {} {}, found {} on {} {} and found {} on {} {}",
        lines,
        plural(lines, "line"),
        plural(errors, "error"),
        errors,
        plural(errors, "line"),
        plural(warnings, "warning"),
        warnings,
        plural(warnings, "line"),
    )
}
