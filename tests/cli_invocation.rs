//! CLI invocation tests
//!
//! Runs the built `props` binary and checks output and exit codes.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::NamedTempFile;

const BIN: &str = env!("CARGO_BIN_EXE_props");

fn props_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .env_remove("PROPS_LOG")
        .output()
        .expect("failed to run props binary")
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(BIN)
        .args(args)
        .env_remove("PROPS_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn props binary");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

// Non-comment lines of properties output
fn entries(text: &str) -> Vec<String> {
    text.lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn test_file_with_overrides() {
    let file = props_file("name=demo\nport=80\n");
    let path = file.path().to_str().unwrap();

    let output = run(&["-f", path, "port=8080", "tls=on"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], format!("# Generated by props v{} from {}", env!("CARGO_PKG_VERSION"), path));
    assert!(lines[1].starts_with("# "), "expected timestamp line, got {:?}", lines[1]);
    assert_eq!(entries(&text), vec!["name=demo", "port=8080", "tls=on"]);
}

#[test]
fn test_no_timestamp_output() {
    let file = props_file("a=1\n");
    let output = run(&["--file", file.path().to_str().unwrap(), "--no-timestamp"]);
    assert_eq!(output.status.code(), Some(0));

    let text = stdout(&output);
    assert_eq!(text.lines().count(), 2);
    assert_eq!(entries(&text), vec!["a=1"]);
}

#[test]
fn test_last_override_wins() {
    let file = props_file("a=1\n");
    let output = run(&["-f", file.path().to_str().unwrap(), "a=2", "a=3"]);
    assert_eq!(entries(&stdout(&output)), vec!["a=3"]);
}

#[test]
fn test_stdin_input() {
    let output = run_with_stdin(&["-", "extra=yes", "--no-timestamp"], "from.stdin = true\n");
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.starts_with("# Generated by props v"));
    assert!(text.lines().next().unwrap().ends_with("from stdin"));
    assert_eq!(entries(&text), vec!["extra=yes", "from.stdin=true"]);
}

#[test]
fn test_list_mode_sorted_raw() {
    let file = props_file("b=2\na=1\npath=C\\:\\\\tmp\n");
    let output = run(&["-f", file.path().to_str().unwrap(), "--list"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output).lines().collect::<Vec<_>>(),
        vec!["a => 1", "b => 2", "path => C:\\tmp"]
    );
}

#[test]
fn test_hyphen_key_override_with_list() {
    let file = props_file("a=1\n");
    let output = run(&["-f", file.path().to_str().unwrap(), "-Dlevel=debug", "-l"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output).lines().collect::<Vec<_>>(),
        vec!["-Dlevel => debug", "a => 1"]
    );
}

#[test]
fn test_list_mode_empty_table() {
    let file = props_file("# nothing\n");
    let output = run(&["-f", file.path().to_str().unwrap(), "-l"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_output_file() {
    let file = props_file("k=v\n");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("merged.properties");

    let output = run(&[
        "-f",
        file.path().to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
        "--no-timestamp",
    ]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(entries(&written), vec!["k=v"]);
}

#[test]
fn test_no_input_detected() {
    let output = run(&["a=1"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("props: No input detected"));
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_no_arguments_prints_usage() {
    let output = run(&[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn test_help_exits_two() {
    for flag in ["-h", "--help"] {
        let output = run(&[flag]);
        assert_eq!(output.status.code(), Some(2));
        assert!(stdout(&output).contains("--file"));
    }
}

#[test]
fn test_version_exits_zero() {
    let output = run(&["--version"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with(&format!("props {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_file_flag_without_value() {
    let output = run(&["-f"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("props: "));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.properties");
    let output = run(&["-f", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("absent.properties"));
}

#[test]
fn test_malformed_escape_exits_two() {
    let file = props_file("bad=\\u12\n");
    let output = run(&["-f", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("malformed"));
    assert!(output.stdout.is_empty());
}
