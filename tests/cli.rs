use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn plotfile() -> Command { Command::cargo_bin("plotfile").unwrap() }

#[test]
fn missing_default_file_fails() {
  let dir = tempfile::tempdir().unwrap();

  plotfile()
    .current_dir(dir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to open debug/data.txt"));
}

#[test]
fn non_numeric_token_fails_before_display() {
  let dir = tempfile::tempdir().unwrap();
  fs::create_dir(dir.path().join("debug")).unwrap();
  fs::write(dir.path().join("debug/data.txt"), "0,1\nabc,1.0\n").unwrap();

  plotfile()
    .current_dir(dir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("line 2, column 0: `abc` is not a number"));
}

#[test]
fn single_column_line_fails() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("data.txt");
  fs::write(&path, "1.0\n").unwrap();

  plotfile()
    .arg(&path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("line 1: expected 2 fields, found 1"));
}

#[test]
fn same_column_twice_is_rejected() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("data.txt");
  fs::write(&path, "0,1\n").unwrap();

  plotfile()
    .arg(&path)
    .args(["--columns", "1,1"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("x and y must read different columns"));
}

#[test]
fn bad_delimiter_is_a_usage_error() {
  plotfile().args(["--delimiter", "::"]).assert().failure().code(2);
}
