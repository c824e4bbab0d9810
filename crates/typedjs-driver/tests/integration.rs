//! Integration tests for the `typedjs` command line.
//!
//! These tests write TypedJS documents to temporary files and run the built
//! binary against them.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Write a document into a fresh temporary directory
fn write_input(name: &str, source: &str) -> PathBuf {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let temp_dir = std::env::temp_dir().join(format!("typedjs_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&temp_dir).expect("Failed to create temp dir");

    let path = temp_dir.join(name);
    fs::write(&path, source).expect("Failed to write test input");
    path
}

fn typedjs(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_typedjs"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run typedjs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_check_clean_file() {
    let input = write_input(
        "user.tjs",
        "interface User { name: string; age: number }\nconst user: User = { name: 'Alice', age: 30 };\n",
    );
    let output = typedjs(&["check", input.to_str().unwrap()]);

    assert!(output.status.success(), "stdout: {}", stdout(&output));
    assert!(stdout(&output).contains("Type check passed!"));
}

#[test]
fn test_check_reports_type_mismatch() {
    let input = write_input("bad.tjs", "let count: number = 'many';\n");
    let output = typedjs(&["check", input.to_str().unwrap()]);
    let out = stdout(&output);

    assert!(!output.status.success());
    assert!(out.contains("typeMismatch"), "stdout: {}", out);
    assert!(out.contains("Type mismatch: Expected 'number' but got 'string'"), "stdout: {}", out);
    assert!(!out.contains("Type check passed!"));
}

#[test]
fn test_check_reports_shape_problems() {
    let input = write_input(
        "shape.tjs",
        "interface Point { x: number; y: number }\nconst p: Point = { x: 1, z: 2 };\n",
    );
    let output = typedjs(&["check", input.to_str().unwrap()]);
    let out = stdout(&output);

    assert!(!output.status.success());
    assert!(out.contains("Unexpected property 'z' in 'Point'"), "stdout: {}", out);
    assert!(out.contains("Property 'y' is missing in 'Point'"), "stdout: {}", out);
}

#[test]
fn test_warning_severity_succeeds() {
    let input = write_input("warn.tjs", "let count: number = 'many';\n");
    let output = typedjs(&["check", "--severity", "warning", input.to_str().unwrap()]);
    let out = stdout(&output);

    assert!(output.status.success(), "stdout: {}", out);
    assert!(out.contains("Warning"), "stdout: {}", out);
    assert!(out.contains("typeMismatch"));
}

#[test]
fn test_strict_flag() {
    let input = write_input("strict.tjs", "const total: number = compute();\n");

    let lenient = typedjs(&["check", input.to_str().unwrap()]);
    assert!(lenient.status.success());

    let strict = typedjs(&["check", "--strict", input.to_str().unwrap()]);
    assert!(!strict.status.success());
    assert!(stdout(&strict).contains("but got 'unknown'"));
}

#[test]
fn test_private_members_are_checked() {
    let input = write_input(
        "private.tjs",
        "class Counter {\n  #count = 0;\n  #bump() { this.#count++; }\n}\nlet total: number = 'none';\n",
    );
    let output = typedjs(&["check", input.to_str().unwrap()]);
    let out = stdout(&output);

    assert!(!output.status.success());
    assert!(out.contains("Type mismatch: Expected 'number' but got 'string'"), "stdout: {}", out);
}

#[test]
fn test_parse_failure_is_reported() {
    let input = write_input("broken.tjs", "let x: number = ;\n");
    let output = typedjs(&["check", input.to_str().unwrap()]);
    let out = stdout(&output);

    assert!(!output.status.success());
    assert!(out.contains("parseFailure"), "stdout: {}", out);
    assert!(out.contains("Parsing error: "), "stdout: {}", out);
}

#[test]
fn test_multiple_files_report_in_order() {
    let first = write_input("first.tjs", "let a: string = 1;\n");
    let second = write_input("second.tjs", "let b: boolean = 'no';\n");
    let output = typedjs(&["check", first.to_str().unwrap(), second.to_str().unwrap()]);
    let out = stdout(&output);

    assert!(!output.status.success());
    let first_at = out.find("first.tjs").expect("first file reported");
    let second_at = out.find("second.tjs").expect("second file reported");
    assert!(first_at < second_at, "stdout: {}", out);
}

#[test]
fn test_missing_file() {
    let missing = std::env::temp_dir().join("typedjs_no_such_file.tjs");
    let output = typedjs(&["check", missing.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read"), "stderr: {}", stderr(&output));
}

#[test]
fn test_check_requires_files() {
    let output = typedjs(&["check"]);
    assert!(!output.status.success());
}

#[test]
fn test_verbose_output() {
    let input = write_input("verbose.tjs", "let ok: boolean = true;\n");
    let output = typedjs(&["check", "--verbose", input.to_str().unwrap()]);
    let out = stdout(&output);

    assert!(output.status.success());
    assert!(out.contains("Checking 1 file(s)"), "stdout: {}", out);
    assert!(out.contains("0 diagnostic(s)"), "stdout: {}", out);
}

#[test]
fn test_parse_command() {
    let input = write_input("parse.tjs", "type Id = string | number;\n");
    let output = typedjs(&["parse", input.to_str().unwrap()]);
    let out = stdout(&output);

    assert!(output.status.success());
    assert!(out.contains("Program"), "stdout: {}", out);
    assert!(out.contains("TypeAlias"), "stdout: {}", out);
}

#[test]
fn test_lex_command() {
    let input = write_input("lex.tjs", "let x = 1;\n");
    let output = typedjs(&["lex", "--positions", input.to_str().unwrap()]);
    let out = stdout(&output);

    assert!(output.status.success());
    assert!(out.contains("Total tokens: 6"), "stdout: {}", out);
    assert!(out.contains("0..3"), "stdout: {}", out);
}
