//! Contract Tests for Tool Invocation
//!
//! Run real processes through `ProcessToolRunner` and check the argument
//! contract: fixed arguments, `-s <stats>`, mode, formula, in that order.

#![cfg(unix)]

use patternbench::config::{AnalysisMode, ToolConfig};
use patternbench::driver::{ProcessToolRunner, ToolCommand, ToolRunner};
use patternbench::error::Error;
use std::fs;
use tempfile::TempDir;

fn shell_tool(script: &str) -> ProcessToolRunner {
    ProcessToolRunner::new(ToolCommand::new(
        "sh",
        vec!["-c".to_string(), script.to_string(), "tool".to_string()],
        AnalysisMode::Both,
    ))
}

#[test]
fn test_successful_tool() {
    let dir = TempDir::new().unwrap();
    let mut runner = ProcessToolRunner::new(ToolCommand::new("true", Vec::new(), AnalysisMode::Both));
    let status = runner.invoke("G p", &dir.path().join("stats.csv")).unwrap();
    assert!(status.is_success());
}

#[test]
fn test_failing_tool_reports_exit_code() {
    let dir = TempDir::new().unwrap();
    let mut runner = ProcessToolRunner::new(ToolCommand::new("false", Vec::new(), AnalysisMode::Both));
    let status = runner.invoke("G p", &dir.path().join("stats.csv")).unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_tool_appends_to_stats_file() {
    let dir = TempDir::new().unwrap();
    let stats = dir.path().join("stats.csv");
    fs::write(&stats, "Absence, 2, G !p, ").unwrap();

    let mut runner = shell_tool("printf 'done\\n' >> \"$2\"");
    runner.invoke("G !p", &stats).unwrap();

    assert_eq!(fs::read_to_string(&stats).unwrap(), "Absence, 2, G !p, done\n");
}

#[test]
fn test_argument_positions() {
    let dir = TempDir::new().unwrap();
    let stats = dir.path().join("stats.csv");

    // $1 is -s, $2 the stats path, $3 the mode, $4 the formula
    let mut runner = shell_tool("printf '%s|%s|%s' \"$1\" \"$3\" \"$4\" >> \"$2\"");
    runner.invoke("G (a => F b)", &stats).unwrap();

    assert_eq!(fs::read_to_string(&stats).unwrap(), "-s|both|G (a => F b)");
}

#[test]
fn test_formula_is_not_shell_expanded() {
    let dir = TempDir::new().unwrap();
    let stats = dir.path().join("stats.csv");

    let mut runner = shell_tool("printf '%s' \"$4\" >> \"$2\"");
    runner.invoke("G ($HOME | `p`)", &stats).unwrap();

    assert_eq!(fs::read_to_string(&stats).unwrap(), "G ($HOME | `p`)");
}

#[test]
fn test_tool_output_is_discarded() {
    let dir = TempDir::new().unwrap();
    let stats = dir.path().join("stats.csv");

    let mut runner = shell_tool("echo noise; echo more >&2; printf ok >> \"$2\"");
    let status = runner.invoke("G p", &stats).unwrap();

    assert!(status.is_success());
    assert_eq!(fs::read_to_string(&stats).unwrap(), "ok");
}

#[test]
fn test_working_directory_from_config() {
    let dir = TempDir::new().unwrap();
    let config = ToolConfig {
        program: "sh".to_string(),
        args: vec![
            "-c".to_string(),
            "pwd > \"$2\"".to_string(),
            "tool".to_string(),
        ],
        working_directory: Some(dir.path().to_path_buf()),
        ..ToolConfig::default()
    };
    let stats = dir.path().join("stats.csv");

    ProcessToolRunner::from_config(&config).invoke("G p", &stats).unwrap();

    let printed = fs::read_to_string(&stats).unwrap();
    assert_eq!(
        fs::canonicalize(printed.trim()).unwrap(),
        fs::canonicalize(dir.path()).unwrap()
    );
}

#[test]
fn test_missing_program() {
    let mut runner = ProcessToolRunner::new(ToolCommand::new(
        "/nonexistent/patternbench-monitor",
        Vec::new(),
        AnalysisMode::Rltl,
    ));
    let err = runner.invoke("G p", std::path::Path::new("stats.csv")).unwrap_err();
    match err {
        Error::ToolSpawnFailed { program, .. } => {
            assert_eq!(program, "/nonexistent/patternbench-monitor")
        }
        other => panic!("expected spawn failure, got {other:?}"),
    }
}
