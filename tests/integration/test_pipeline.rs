//! Integration Tests for the Translate-then-Run Pipeline

#[allow(dead_code)]
#[path = "../test_utils/fixtures.rs"]
mod fixtures;
#[allow(dead_code)]
#[path = "../test_utils/mock_runner.rs"]
mod mock_runner;

use fixtures::{sample_records, write_file, SAMPLE_CORPUS};
use mock_runner::MockToolRunner;
use patternbench::config::Config;
use patternbench::models::InputMode;
use patternbench::pipeline::{run_with, translate_file};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_corpus_to_statistics() {
    let dir = TempDir::new().unwrap();
    let corpus = write_file(dir.path(), "rv_properties.txt", SAMPLE_CORPUS);
    let specs = dir.path().join("specs.ltl");
    let stats = dir.path().join("statistics.csv");
    let config = Config::default();

    let translated = translate_file(&corpus, &specs, &config.translator).unwrap();

    let mut runner = MockToolRunner::writing("12, 30");
    let mut progress = Vec::new();
    let summary = run_with(&mut runner, &specs, &stats, &config, &mut progress).unwrap();

    assert_eq!(summary.total, translated.records_emitted);
    assert_eq!(summary.invoked, translated.records_emitted);

    let expected: Vec<String> = sample_records().into_iter().map(|r| r.formula).collect();
    assert_eq!(runner.formulas(), expected);

    let rows: Vec<String> = fs::read_to_string(&stats)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    let expected_rows: Vec<String> = sample_records()
        .iter()
        .map(|r| format!("{}, 12, 30", r.to_csv_line()))
        .collect();
    assert_eq!(rows, expected_rows);

    let progress = String::from_utf8(progress).unwrap();
    assert_eq!(progress.lines().count(), translated.records_emitted - 1);
    assert!(progress.ends_with("Progress: 5/6.\n"));
}

#[test]
fn test_record_file_rerun_in_raw_mode_uses_whole_lines() {
    let dir = TempDir::new().unwrap();
    let corpus = write_file(dir.path(), "corpus.txt", "PATTERN: Absence\n- [] !p\n");
    let specs = dir.path().join("specs.ltl");
    let stats = dir.path().join("stats.csv");

    let mut config = Config::default();
    translate_file(&corpus, &specs, &config.translator).unwrap();

    config.driver.input_mode = InputMode::Raw;
    let mut runner = MockToolRunner::new();
    run_with(&mut runner, &specs, &stats, &config, Vec::new()).unwrap();

    // Raw mode hands the entire line to the tool
    assert_eq!(runner.formulas(), vec!["Absence, 2, G !p"]);
}

#[test]
fn test_resume_after_interruption_completes_remaining_items() {
    let dir = TempDir::new().unwrap();
    let corpus = write_file(dir.path(), "rv_properties.txt", SAMPLE_CORPUS);
    let specs = dir.path().join("specs.ltl");
    let stats = dir.path().join("statistics.csv");

    let mut config = Config::default();
    translate_file(&corpus, &specs, &config.translator).unwrap();

    // An earlier run only got through the first half
    let records = sample_records();
    let first_half = write_file(
        dir.path(),
        "first_half.ltl",
        &fixtures::record_file_content(&records[..3]),
    );
    let mut first = MockToolRunner::writing("1, 1");
    let summary = run_with(&mut first, &first_half, &stats, &config, Vec::new()).unwrap();
    assert_eq!(summary.invoked, 3);

    config.driver.resume = true;
    let mut second = MockToolRunner::writing("2, 2");
    let summary = run_with(&mut second, &specs, &stats, &config, Vec::new()).unwrap();
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.invoked, records.len() - 3);

    let content = fs::read_to_string(&stats).unwrap();
    assert_eq!(content.lines().count(), records.len());
    assert_eq!(content.lines().filter(|l| l.ends_with("1, 1")).count(), 3);
}
