//! Integration tests for command mode (-c/--command flag)

use std::path::PathBuf;
use std::process::Command;

fn run_command(args: &[&str]) -> (String, String, i32) {
    let settings = empty_settings();
    let _cleanup = Cleanup(settings.clone());
    let output = Command::new(env!("CARGO_BIN_EXE_theatre-grid"))
        // Tests must not depend on a user's ~/.config/theatre-grid/settings.toml.
        .arg("--settings")
        .arg(&settings)
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn temp_path(name: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "theatre_grid_cli_{}_{}_{:?}.{}",
        name,
        std::process::id(),
        std::thread::current().id(),
        ext
    ))
}

fn empty_settings() -> PathBuf {
    let path = temp_path("settings", "toml");
    std::fs::write(&path, "").unwrap();
    path
}

struct Cleanup(PathBuf);
impl Drop for Cleanup {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn test_print_new_grid() {
    let (stdout, _, code) = run_command(&["--new", "2x3", "-c", "print"]);
    assert_eq!(stdout, "A1 | B1 | C1\nA2 | B2 | C2\n");
    assert_eq!(code, 0);
}

#[test]
fn test_merge_and_print() {
    let (stdout, _, code) = run_command(&[
        "--new",
        "3x3",
        "-c",
        "set A1 Theatre",
        "-c",
        "set A2 Session",
        "-c",
        "merge A1:B2",
        "-c",
        "print",
    ]);
    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "A1:B2 Theatre Session | C1\nC2\nA3 | B3 | C3\n"
    );
}

#[test]
fn test_non_rectangular_merge_fails() {
    let (_, stderr, code) = run_command(&[
        "--new",
        "3x3",
        "-c",
        "merge A1:B2",
        "-c",
        "merge B1:C1",
    ]);
    assert_eq!(code, 1);
    assert!(stderr.contains("line 2: non-rectangular selection"), "{}", stderr);
}

#[test]
fn test_parse_error_exit_code() {
    let (_, stderr, code) = run_command(&["--new", "2x2", "-c", "explode A1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Parse error at line 1"), "{}", stderr);
}

#[test]
fn test_missing_template_source() {
    let (_, stderr, code) = run_command(&["-c", "print"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("No template"), "{}", stderr);
}

#[test]
fn test_export_json_then_check() {
    let path = temp_path("export", "json");
    let _cleanup = Cleanup(path.clone());
    let path_str = path.to_str().unwrap();

    let (_, stderr, code) = run_command(&[
        "--new",
        "2x2",
        "-c",
        "field A2 surgeon",
        "-c",
        "merge A2:B2",
        "-o",
        path_str,
    ]);
    assert_eq!(code, 0, "{}", stderr);

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["rows"], 2);
    assert_eq!(value["cells"][2]["colSpan"], 2);
    assert_eq!(value["cells"][3]["rowSpan"], 0);

    let (stdout, _, code) = run_command(&["--check", path_str]);
    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "ok: 2x2 template, 3 visible cell(s), 1 merge(s)\nfields: surgeon\n"
    );
}

#[test]
fn test_check_rejects_overlapping_template() {
    let path = temp_path("overlap", "json");
    let _cleanup = Cleanup(path.clone());
    std::fs::write(
        &path,
        r#"{
            "rows": 1, "cols": 2,
            "cells": [
                {"id": 0, "row": 0, "col": 0, "rowSpan": 1, "colSpan": 2, "type": "header"},
                {"id": 1, "row": 0, "col": 1, "rowSpan": 1, "colSpan": 1, "type": "header"}
            ],
            "columnWidths": [120, 120],
            "rowHeights": [40]
        }"#,
    )
    .unwrap();

    let (_, stderr, code) = run_command(&["--check", path.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("covered by more than one cell"), "{}", stderr);
}

#[test]
fn test_export_csv_flattens_merges() {
    let path = temp_path("flat", "csv");
    let _cleanup = Cleanup(path.clone());

    let (_, stderr, code) = run_command(&[
        "--new",
        "2x3",
        "-c",
        "set A1 Theatre",
        "-c",
        "set C1 Date",
        "-c",
        "merge A1:B1",
        "-o",
        path.to_str().unwrap(),
    ]);
    assert_eq!(code, 0, "{}", stderr);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "Theatre,Date\n,,\n"
    );
}

#[test]
fn test_width_is_clamped_to_minimum() {
    let path = temp_path("width", "json");
    let _cleanup = Cleanup(path.clone());

    let (_, _, code) = run_command(&[
        "--new",
        "1x2",
        "-c",
        "width B 10",
        "-o",
        path.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["columnWidths"], serde_json::json!([120, 50]));
}

#[test]
fn test_settings_file_is_removed_after_run() {
    let (_, _, code) = run_command(&["--new", "1x1", "-c", "print"]);
    assert_eq!(code, 0);
    assert!(!temp_path("settings", "toml").exists());
}

#[test]
fn test_load_command_reports_missing_file() {
    let (_, stderr, code) = run_command(&[
        "--new",
        "1x1",
        "-c",
        "load /nonexistent/theatre-grid/list.json",
    ]);
    assert_eq!(code, 1);
    assert!(stderr.contains("line 1: IO error"), "{}", stderr);
}

#[test]
fn test_unsupported_output_extension() {
    let (_, stderr, code) = run_command(&["--new", "1x1", "-o", "out.xlsx"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unsupported output format"), "{}", stderr);
}
