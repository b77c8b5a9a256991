//! Integration tests for the non-interactive command line

use std::path::PathBuf;
use std::process::Command;

fn temp_path(tag: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "cellsheet_cli_{}_{}_{}.{}",
        tag,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos(),
        ext,
    ))
}

struct Cleanup(Vec<PathBuf>);
impl Drop for Cleanup {
    fn drop(&mut self) {
        for path in &self.0 {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Run the binary with `settings` as its settings file so tests never read
/// a user's ~/.config/cellsheet/settings.toml.
fn run_with_settings(settings: &str, args: &[&str]) -> (String, String, i32) {
    let settings_path = temp_path("settings", "toml");
    let _cleanup = Cleanup(vec![settings_path.clone()]);
    std::fs::write(&settings_path, settings).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cellsheet"))
        .arg("--config")
        .arg(&settings_path)
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn run_command(args: &[&str]) -> (String, String, i32) {
    run_with_settings("", args)
}

#[test]
fn test_basic_arithmetic() {
    let (stdout, _, code) = run_command(&["-s", "A1==5 + 3 * 2"]);
    assert_eq!(stdout.trim(), "A1\t11");
    assert_eq!(code, 0);
}

#[test]
fn test_edits_recalculate_dependents() {
    let (stdout, _, code) = run_command(&[
        "-s", "A1=45",
        "-s", "A2==13+A1",
        "-s", "A3==A2+A1",
        "-s", "A1=12",
    ]);
    assert_eq!(stdout, "A1\t12\nA2\t25\nA3\t37\n");
    assert_eq!(code, 0);
}

#[test]
fn test_output_sorted_by_row_then_column() {
    let (stdout, _, code) = run_command(&["-s", "b2=4", "-s", "A2=3", "-s", "B1=2", "-s", "a1=1"]);
    assert_eq!(stdout, "A1\t1\nB1\t2\nA2\t3\nB2\t4\n");
    assert_eq!(code, 0);
}

#[test]
fn test_circular_reference_fails() {
    let (stdout, stderr, code) = run_command(&["-s", "A1==B1", "-s", "B1==A1"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Failed to set B1"));
    assert!(stderr.contains("circular dependency"));
}

#[test]
fn test_invalid_formula_fails() {
    let (_, stderr, code) = run_command(&["-s", "A1==2++3"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("Error: Failed to set A1"));
}

#[test]
fn test_invalid_name_fails() {
    let (_, stderr, code) = run_command(&["-s", "total=1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid cell name"));
}

#[test]
fn test_division_by_zero_is_error_value() {
    let (stdout, _, code) = run_command(&["-s", "A1==1/0"]);
    assert_eq!(stdout.trim(), "A1\t#ERR!");
    assert_eq!(code, 0);
}

#[test]
fn test_settings_change_output() {
    let settings = "precision = 2\nshow_contents = true\nerror_marker = \"ERR\"\n";
    let (stdout, stderr, code) =
        run_with_settings(settings, &["-s", "A1=2", "-s", "B1==A1/3", "-s", "C1==Z1"]);
    assert_eq!(code, 0);
    assert!(stderr.is_empty(), "unexpected warnings: {stderr}");
    assert_eq!(stdout, "A1\t2\t2.00\nB1\t=A1/3\t0.67\nC1\t=Z1\tERR\n");
}

#[test]
fn test_bad_settings_warn() {
    let (stdout, stderr, code) = run_with_settings("nope = 1", &["-s", "A1=1"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Warning: Failed to parse"));
    assert_eq!(stdout.trim(), "A1\t1");
}

#[test]
fn test_save_and_reopen() {
    let sheet = temp_path("save", "sheet");
    let _cleanup = Cleanup(vec![sheet.clone()]);
    let sheet_str = sheet.to_str().unwrap();

    let (_, stderr, code) = run_command(&[
        "-s", "A1=10",
        "-s", "A2==A1*A1",
        "-s", "B1=label",
        "-o", sheet_str,
    ]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Saved to"));

    let content = std::fs::read_to_string(&sheet).unwrap();
    assert!(content.contains("A1: 10"));
    assert!(content.contains("A2: =A1*A1"));
    assert!(content.contains("B1: \"label\""));

    let (stdout, _, code) = run_command(&[sheet_str, "-s", "A1=3"]);
    assert_eq!(code, 0);
    assert_eq!(stdout, "A1\t3\nB1\tlabel\nA2\t9\n");
}

#[test]
fn test_open_missing_file_fails() {
    let missing = temp_path("missing", "sheet");
    let (_, stderr, code) = run_command(&[missing.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Failed to open"));
}

#[test]
fn test_unknown_option() {
    let (_, stderr, code) = run_command(&["--frobnicate"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown option"));
}

#[test]
fn test_set_requires_equals() {
    let (_, stderr, code) = run_command(&["-s", "A1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("NAME=CONTENTS"));
}
