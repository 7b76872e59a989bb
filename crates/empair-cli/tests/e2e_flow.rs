//! End-to-end tests for the complete pair-finding flow.
//!
//! Runs the compiled binary over real files: read → validate → merge →
//! overlap → render.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn empair_binary() -> String {
    env!("CARGO_BIN_EXE_empair").to_string()
}

/// Run the binary with an isolated home so no user config is picked up.
fn run_empair(home: &Path, args: &[&str]) -> Output {
    Command::new(empair_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run empair")
}

fn write_file(temp: &TempDir, name: &str, content: &str) -> String {
    let path = temp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path.display().to_string()
}

#[test]
fn test_pair_reports_longest_pair() {
    let temp = TempDir::new().unwrap();
    let input = write_file(
        &temp,
        "employees.csv",
        "EmpID, ProjectID, DateFrom, DateTo\n\
         143, 12, 2013-11-01, 2014-01-05\n\
         218, 10, 2012-05-16, 2014-01-01\n\
         143, 10, 2009-01-01, 2011-04-27\n\
         218, 12, 2013-12-01, 2014-02-01\n",
    );

    let output = run_empair(temp.path(), &["pair", &input]);
    assert!(
        output.status.success(),
        "pair should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Longest working pair: 143, 218 (36 days)"));
    assert!(stdout.contains("143         218         12         36"));
}

#[test]
fn test_pair_json_output() {
    let temp = TempDir::new().unwrap();
    let input = write_file(
        &temp,
        "employees.csv",
        "1,100,2024-01-01,2024-01-10\n2,100,2024-01-05,2024-01-20\n",
    );

    let output = run_empair(temp.path(), &["pair", "--json", &input]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["employee_low"], 1);
    assert_eq!(value["employee_high"], 2);
    assert_eq!(value["total_days"], 6);
    assert_eq!(value["breakdown"][0]["project_id"], 100);
    assert_eq!(value["breakdown"][0]["days_overlap"], 6);
}

#[test]
fn test_pair_without_overlap_prints_sentinel_message() {
    let temp = TempDir::new().unwrap();
    let input = write_file(
        &temp,
        "employees.csv",
        "EmpID,ProjectID,DateFrom,DateTo\n1,1,2024-01-01,2024-01-10\n2,2,2024-01-01,2024-01-10\n",
    );

    let output = run_empair(temp.path(), &["pair", &input]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "No pair of employees worked together on a common project.\n"
    );
}

#[test]
fn test_malformed_row_fails_with_line_number() {
    let temp = TempDir::new().unwrap();
    let input = write_file(
        &temp,
        "employees.csv",
        "EmpID,ProjectID,DateFrom,DateTo\n1,2,2024-01-01\n",
    );

    let output = run_empair(temp.path(), &["pair", &input]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("line 2: row must contain exactly 4 columns, found 3"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_duplicate_row_is_rejected() {
    let temp = TempDir::new().unwrap();
    let input = write_file(
        &temp,
        "employees.csv",
        "1,2,2024-01-01,2024-01-31\n3,2,2024-01-01,2024-01-31\n1,2,2024-01-01,2024-01-31\n",
    );

    let output = run_empair(temp.path(), &["validate", &input]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 3: duplicate row (first seen on line 1)"));
}

#[test]
fn test_null_date_to_uses_today() {
    let temp = TempDir::new().unwrap();
    let input = write_file(&temp, "employees.csv", "1,5,2020-01-01,NULL\n");

    let output = run_empair(temp.path(), &["merge", "--json", &input]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let date_to = value[0]["date_to"].as_str().unwrap().to_string();
    let today = chrono::Local::now().date_naive();
    let yesterday = today.pred_opt().unwrap();
    // allow for the run straddling midnight
    assert!(
        date_to == today.to_string() || date_to == yesterday.to_string(),
        "date_to {date_to} should be today ({today})"
    );
}

#[test]
fn test_reads_stdin() {
    let temp = TempDir::new().unwrap();
    let mut child = Command::new(empair_binary())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .args(["validate", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn empair");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"EmpID,ProjectID,DateFrom,DateTo\n1,5,2024-01-01,2024-01-10\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Records:     1"));
}

#[test]
fn test_config_file_changes_year_window() {
    let temp = TempDir::new().unwrap();
    let input = write_file(&temp, "employees.csv", "1,5,1995-01-01,1995-12-31\n");
    let config = write_file(&temp, "config.toml", "min_year = 2000\n");

    let output = run_empair(temp.path(), &["validate", &input]);
    assert!(output.status.success());

    let output = run_empair(temp.path(), &["--config", &config, "validate", &input]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside allowed range"), "unexpected stderr: {stderr}");
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();
    let output = run_empair(temp.path(), &[]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage:"));
}
