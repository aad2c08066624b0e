//! File-based tests for the check glue.

use std::fs;
use std::io;
use std::path::PathBuf;

use csvlint_cli::check::{check_path, exit_code};
use csvlint_model::ErrorKind;
use csvlint_validate::Validation;

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("csvlint_check_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn clean_file_exits_zero() {
    let path = temp_file("clean.csv", "a,b,c\n1,2,3\n");
    let validation = check_path(&path, ',', false).expect("check file");
    assert!(validation.is_clean());
    assert_eq!(exit_code(&validation), 0);

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn ragged_file_exits_one() {
    let path = temp_file("ragged.csv", "a,b,c\n1,2\n3,4,5\n");
    let validation = check_path(&path, ',', false).expect("check file");
    assert_eq!(validation.diagnostics.len(), 1);
    assert_eq!(validation.diagnostics[0].kind, ErrorKind::FieldCount);
    assert_eq!(exit_code(&validation), 1);

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn semicolon_file_checks_with_named_delimiter() {
    let path = temp_file("semi.csv", "a;b\n1;2;3\n");
    let validation = check_path(&path, ';', false).expect("check file");
    assert_eq!(validation.diagnostics.len(), 1);
    assert_eq!(validation.diagnostics[0].record_number, 1);

    let _ = fs::remove_file(&path);
    let _ = fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn missing_file_is_an_error() {
    let path = PathBuf::from("/nonexistent/csvlint/never.csv");
    let error = check_path(&path, ',', false).expect_err("should fail");
    assert!(error.to_string().contains("never.csv"));
}

#[test]
fn stream_failure_exits_two() {
    let validation = Validation {
        diagnostics: Vec::new(),
        halted: false,
        fatal: Some(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed")),
    };
    assert_eq!(exit_code(&validation), 2);
}
