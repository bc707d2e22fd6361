//! Integration tests for feed validation
//!
//! Runs whole feeds through the driver with the real artist and track
//! schemas:
//! - end-to-end record scenarios
//! - error budget behaviour
//! - records split at Unicode line separators
//! - files on disk

use feed_validator_core::{
    Checker, FeedError, FeedReport, FeedValidator, PrimitiveKind, RecordKind, ValidatorConfig,
};
use proptest::prelude::*;
use std::io::{Cursor, Write};

/// Helper to validate an in-memory feed
fn validate(kind: RecordKind, config: ValidatorConfig, input: &str) -> FeedReport {
    let schema = kind.schema().unwrap();
    FeedValidator::new(&schema, config).validate_reader(Cursor::new(input.as_bytes().to_vec()))
}

#[test]
fn test_track_record_is_valid() {
    let input = r#"{"type":"track","id":"T1","name":"Song","artist":{"id":"A1","name":"Artist"}}"#;
    let report = validate(RecordKind::Track, ValidatorConfig::new(), input);

    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert_eq!(report.lines_processed, 1);
}

#[test]
fn test_artist_missing_name() {
    let report = validate(RecordKind::Artist, ValidatorConfig::new(), "{\"id\":\"A1\"}\n");

    assert_eq!(
        report.errors,
        vec![concat!(
            "Line 1: Found valid JSON which does not match expected schema:",
            "\n\tDid not find required field \"name\""
        )]
    );
    assert!(report.warnings.is_empty());
}

#[test]
fn test_artist_blank_name_is_a_warning() {
    let report = validate(
        RecordKind::Artist,
        ValidatorConfig::new(),
        "{\"id\":\"A1\",\"name\":\"\",\"published\":true}\n",
    );

    assert!(report.is_valid());
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.warnings[0].line, 1);
    assert_eq!(
        report.warnings[0].message,
        "\"name\" was required, but found an invalid entry of \"\""
    );
}

#[test]
fn test_mixed_feed_keeps_line_order() {
    let input = [
        r#"{"id":"A1","name":"One"}"#,
        r#"{"id":"A2"}"#,
        r#"not json"#,
        r#"{"id":"A4","name":"Four","regions":["US"],"regions_delete":["CA"]}"#,
        r#"{"id":"A5","name":"Five","takedown":"yes"}"#,
    ]
    .join("\n");
    let report = validate(RecordKind::Artist, ValidatorConfig::new(), &input);

    assert_eq!(report.lines_processed, 5);
    assert_eq!(report.error_count(), 4);
    assert!(report.errors[0].starts_with("Line 2: "));
    assert!(report.errors[1].starts_with("Line 3: Found invalid JSON: "));
    assert_eq!(
        report.errors[2],
        concat!(
            "Line 4: Found valid JSON which does not match expected schema:",
            "\n\tFields 'regions' and 'regions_delete' are not allowed to be attached to the same entity.",
            "\n\tFields 'regions_delete' and 'regions' are not allowed to be attached to the same entity."
        )
    );
    assert!(report.errors[3].contains(
        "Field \"takedown\" had incorrect type. Expected: \"boolean\" but found: \"string\""
    ));
}

#[test]
fn test_error_budget_stops_early() {
    let input = "bad\n".repeat(10);
    let report = validate(
        RecordKind::Artist,
        ValidatorConfig::new().with_max_errors(Some(3)),
        &input,
    );

    assert_eq!(report.error_count(), 3);
    assert!(report.stopped_early);
    assert_eq!(report.lines_processed, 3);
}

#[test]
fn test_split_record_is_reassembled() {
    let input = concat!(
        "{\"id\":\"A1\",\"name\":\"Art\u{2029}ist\"}\n",
        "{\"id\":\"A2\",\"name\":\"Line\u{2028}Sep\"}\n"
    );
    let report = validate(RecordKind::Artist, ValidatorConfig::new(), input);

    assert!(report.is_valid(), "{:?}", report.errors);
    assert_eq!(report.lines_processed, 2);
}

#[test]
fn test_validate_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"id":"A1","name":"One"}}"#).unwrap();
    writeln!(file, r#"{{"id":"A2","name":"Two","extras":{{"genre":"jazz"}}}}"#).unwrap();
    file.flush().unwrap();

    let schema = RecordKind::Artist.schema().unwrap();
    let report = FeedValidator::new(&schema, ValidatorConfig::new())
        .validate_path(file.path())
        .unwrap();

    assert!(report.is_valid());
    assert_eq!(report.lines_processed, 2);
    assert!(report.duration_ms.is_some());
}

#[test]
fn test_validate_path_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let schema = RecordKind::Track.schema().unwrap();
    let err = FeedValidator::new(&schema, ValidatorConfig::new())
        .validate_path(&dir.path().join("missing.json"))
        .unwrap_err();

    assert!(matches!(err, FeedError::FileError(_)));
    assert!(err.is_user_error());
}

proptest! {
    #[test]
    fn prop_integer_text_is_coerced_in_fields(n in any::<i64>()) {
        let record = serde_json::json!({"id": "A", "name": "N", "release_year": n.to_string()});
        let schema = Checker::composite(
            vec![feed_validator_core::Field::text("id"), feed_validator_core::Field::text("name")],
            vec![feed_validator_core::Field::integer("release_year")],
            vec![],
        ).unwrap();
        prop_assert!(schema.validate(&record, true).is_clean());
    }

    #[test]
    fn prop_integer_text_is_rejected_in_lists(n in any::<i64>()) {
        let outcome = Checker::list(PrimitiveKind::Integer)
            .validate(&serde_json::json!([n.to_string()]), true);
        prop_assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn prop_separator_inside_name_never_breaks_record(
        head in "[a-zA-Z0-9 ]{0,12}",
        tail in "[a-zA-Z0-9 ]{0,12}",
        paragraph in any::<bool>(),
    ) {
        let sep = if paragraph { '\u{2029}' } else { '\u{2028}' };
        let line = format!("{{\"id\":\"A1\",\"name\":\"x{}{}{}\"}}\n", head, sep, tail);
        let report = validate(RecordKind::Artist, ValidatorConfig::new(), &line);
        prop_assert!(report.is_valid());
        prop_assert_eq!(report.lines_processed, 1);
    }
}
