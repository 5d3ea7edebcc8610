//! CLI Integration Tests
//!
//! Tests the change-formatter binary directly using assert_cmd.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_input(dir: &Path, rows: &[&[&str]]) -> PathBuf {
    let path = dir.join("changes.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            worksheet.write_string(r as u32, c as u16, *value).unwrap();
        }
    }
    workbook.save(&path).unwrap();
    path
}

fn sample(dir: &Path) -> PathBuf {
    write_input(
        dir,
        &[
            &["Title", "Location", "OnLine/Outage", "CI", "BC", "ChangeId"],
            &[
                "Patch night",
                "NYC",
                "Outage",
                "a,b,c",
                "ST1 (RelationType = Direct),Other1 (RelationType = Direct)",
                "CHG1",
            ],
            &[
                "Lowercase tags",
                "LDN",
                "Online",
                "a",
                "st-fx (relationtype = direct)",
                "CHG2",
            ],
        ],
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("change-formatter").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("change-formatter"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("change-formatter").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("change-formatter"));
}

#[test]
fn test_format_help_mentions_flags() {
    let mut cmd = Command::cargo_bin("change-formatter").unwrap();
    cmd.args(["format", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--case-insensitive"))
        .stdout(predicate::str::contains("--config"));
}

// ═══════════════════════════════════════════════════════════════════════════
// FORMAT COMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_format_writes_workbook() {
    let temp = TempDir::new().unwrap();
    let input = sample(temp.path());
    let output = temp.path().join("formatted_output.xlsx");

    let mut cmd = Command::cargo_bin("change-formatter").unwrap();
    cmd.arg("format")
        .arg(&input)
        .arg(&output)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("Format Complete"))
        .stdout(predicate::str::contains("2 records"));

    assert!(output.exists());
}

#[test]
fn test_format_missing_input_fails() {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("change-formatter").unwrap();
    cmd.arg("format")
        .arg(temp.path().join("missing.xlsx"))
        .arg(temp.path().join("out.xlsx"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open Excel file"));
}

#[test]
fn test_format_unrecognised_layout_fails() {
    let temp = TempDir::new().unwrap();
    let input = write_input(temp.path(), &[&["Foo", "Bar"], &["1", "2"]]);
    let output = temp.path().join("out.xlsx");

    let mut cmd = Command::cargo_bin("change-formatter").unwrap();
    cmd.arg("format")
        .arg(&input)
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognised input layout"));

    assert!(!output.exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// PREVIEW COMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_preview_text() {
    let temp = TempDir::new().unwrap();
    let input = sample(temp.path());

    let mut cmd = Command::cargo_bin("change-formatter").unwrap();
    cmd.env("NO_COLOR", "1")
        .arg("preview")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("NYC, Outage, 3 CIs, 2 BC (Direct)"))
        .stdout(predicate::str::contains("Trading Apps: ST1"));
}

#[test]
fn test_preview_json_respects_row_limit() {
    let temp = TempDir::new().unwrap();
    let input = sample(temp.path());

    let mut cmd = Command::cargo_bin("change-formatter").unwrap();
    cmd.args(["preview", "-n", "1", "--json"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"change_ref\": \"CHG1\""))
        .stdout(predicate::str::contains("CHG2").not());
}

#[test]
fn test_preview_case_insensitive_flag() {
    let temp = TempDir::new().unwrap();
    let input = sample(temp.path());

    let mut cmd = Command::cargo_bin("change-formatter").unwrap();
    cmd.args(["preview", "--json", "--case-insensitive"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"st-fx\""));
}

#[test]
fn test_preview_with_config_file() {
    let temp = TempDir::new().unwrap();
    let input = sample(temp.path());
    let config = temp.path().join("formatter.yaml");
    std::fs::write(&config, "classifier:\n  trading_prefix: OTH\n").unwrap();

    let mut cmd = Command::cargo_bin("change-formatter").unwrap();
    cmd.args(["preview", "--json", "-n", "1", "--config"])
        .arg(&config)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"trading_apps\": [\n      \"Other1\"\n    ]"));
}
