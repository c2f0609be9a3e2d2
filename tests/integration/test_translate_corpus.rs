//! Integration Tests for Corpus Translation
//!
//! Translate corpus files end to end and check the record file written.

#[allow(dead_code)]
#[path = "../test_utils/fixtures.rs"]
mod fixtures;

use fixtures::{record_file_content, sample_records, write_file, SAMPLE_CORPUS};
use patternbench::config::TranslatorConfig;
use patternbench::error::{Error, FormatError};
use patternbench::models::Record;
use patternbench::pipeline::translate_file;
use patternbench::translator::{HeaderBinding, PatternTranslator};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_translate_sample_corpus_file() {
    let dir = TempDir::new().unwrap();
    let corpus = write_file(dir.path(), "rv_properties.txt", SAMPLE_CORPUS);
    let output = dir.path().join("specs.ltl");

    let summary = translate_file(&corpus, &output, &TranslatorConfig::default()).unwrap();
    assert_eq!(summary.records_emitted, 6);
    assert_eq!(summary.corrections_applied, 2);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        record_file_content(&sample_records())
    );
}

#[test]
fn test_record_lines_match_source_positions() {
    let corpus: Vec<String> = SAMPLE_CORPUS.lines().map(str::to_string).collect();
    for record in sample_records() {
        let source = &corpus[(record.source_line - 1) as usize];
        assert!(
            source.starts_with("- ") || source.starts_with("@ "),
            "line {} is not a property: {:?}",
            record.source_line,
            source
        );
    }
}

#[test]
fn test_format_error_keeps_partial_output() {
    let dir = TempDir::new().unwrap();
    let corpus = write_file(
        dir.path(),
        "corpus.txt",
        "PATTERN: Absence\n- [] !p\n- [] !q\nPATTERN: Existence\n- <> p\n",
    );
    let output = dir.path().join("specs.ltl");

    let err = translate_file(&corpus, &output, &TranslatorConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Format(FormatError::PropertyWithoutPattern { line: 3 })
    ));
    assert_eq!(fs::read_to_string(&output).unwrap(), "Absence, 2, G !p\n");
}

#[test]
fn test_property_before_any_header() {
    let err = PatternTranslator::default()
        .translate_str("Introduction\n- [] p\n")
        .unwrap_err();
    assert!(err.is_format_error());
}

#[test]
fn test_one_to_many_binding_groups_properties() {
    let translator = PatternTranslator::new(TranslatorConfig {
        header_binding: HeaderBinding::OneToMany,
        ..TranslatorConfig::default()
    });
    let err = translator
        .translate_str("PATTERN: Absence\n- [] !p\n@ [] !q\n???\n- <> r\n")
        .unwrap_err();
    // The break ends the group, so the last property has no header again
    assert!(err.is_format_error());

    let records = translator
        .translate_str("PATTERN: Absence\n- [] !p\n@ [] !q\n")
        .unwrap();
    assert_eq!(
        records,
        vec![
            Record::new("Absence", 2, "G !p"),
            Record::new("Absence", 3, "G !q"),
        ]
    );
}

#[test]
fn test_missing_corpus_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = translate_file(
        &dir.path().join("absent.txt"),
        &dir.path().join("out.ltl"),
        &TranslatorConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_crlf_corpus() {
    let records = PatternTranslator::default()
        .translate_str("PATTERN: Response\r\n- <> ( a && <> b )\r\n")
        .unwrap();
    assert_eq!(records, vec![Record::new("Response", 2, "F ( a & F b )")]);
}
