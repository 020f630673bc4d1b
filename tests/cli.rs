//! End-to-end tests for the sheetpeek binary

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn sheetpeek() -> Command {
    Command::cargo_bin("sheetpeek").unwrap()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn prints_three_sections_in_order() {
    let output = sheetpeek().arg(fixture("basic.xlsx")).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let headers = stdout.find("--- HEADERS ---").unwrap();
    let rows = stdout.find("--- FIRST 3 ROWS ---").unwrap();
    let types = stdout.find("--- DATA TYPES ---").unwrap();
    assert!(headers < rows && rows < types);
}

#[test]
fn headers_section_lists_column_names() {
    sheetpeek()
        .arg(fixture("basic.xlsx"))
        .assert()
        .success()
        .stdout(predicate::str::contains("['A', 'B', 'C']"));
}

#[test]
fn preview_stops_after_three_rows() {
    sheetpeek()
        .arg(fixture("basic.xlsx"))
        .assert()
        .success()
        .stdout(predicate::str::contains("apple"))
        .stdout(predicate::str::contains("banana"))
        .stdout(predicate::str::contains("cherry"))
        .stdout(predicate::str::contains("damson").not())
        .stdout(predicate::str::contains("elderberry").not());
}

#[test]
fn short_table_previews_its_only_row() {
    sheetpeek()
        .arg(fixture("single_row.xlsx"))
        .assert()
        .success()
        .stdout(predicate::str::contains("['X', 'Y']"))
        .stdout(predicate::str::contains("only"))
        .stdout(predicate::str::contains("│ 0 │"))
        .stdout(predicate::str::contains("│ 1 │").not());
}

#[test]
fn data_types_section_reports_inferred_types() {
    sheetpeek()
        .arg(fixture("basic.xlsx"))
        .assert()
        .success()
        .stdout(predicate::str::contains("A  int"))
        .stdout(predicate::str::contains("B  string"))
        .stdout(predicate::str::contains("C  mixed"));
}

#[test]
fn missing_file_reports_single_error_line() {
    sheetpeek()
        .arg("no_such_file.xlsx")
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("Error:"))
        .stdout(predicate::str::contains("--- HEADERS ---").not())
        .stdout(predicate::str::contains("--- FIRST 3 ROWS ---").not())
        .stdout(predicate::str::contains("--- DATA TYPES ---").not());
}

#[test]
fn unsupported_format_reports_error() {
    let mut file = tempfile::Builder::new()
        .suffix(".txt")
        .tempfile()
        .unwrap();
    writeln!(file, "not a spreadsheet").unwrap();

    sheetpeek()
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::starts_with("Error:"))
        .stdout(predicate::str::contains("Unsupported file format"));
}

#[test]
fn output_is_byte_identical_across_runs() {
    let first = sheetpeek().arg(fixture("basic.xlsx")).output().unwrap();
    let second = sheetpeek().arg(fixture("basic.xlsx")).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}
