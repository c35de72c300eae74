//! Integration tests that run the CLI binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_snap2solve"));
    cmd.env_remove("OPENAI_API_KEY")
        .env_remove("SNAP2SOLVE_ADMIN_PASS")
        .env_remove("SNAP2SOLVE_MODEL");
    cmd
}

/// Run from a temp dir so dotenv() won't load .env from the project root.
fn run_in_tempdir(args: &[&str]) -> Output {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    bin()
        .args(args)
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let mut child = bin()
        .args(args)
        .current_dir(tmp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary not found - run cargo build first");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait")
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let output = run_in_tempdir(&["--help"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--prompt"));
    assert!(stdout.contains("--image"));
    assert!(stdout.contains("segment"));
}

#[test]
fn cli_version_succeeds() {
    let output = run_in_tempdir(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("snap2solve"));
}

#[test]
fn cli_prompt_without_api_key_exits_with_error() {
    let output = run_in_tempdir(&["-p", "solve 2x = 4"]);
    assert!(
        !output.status.success(),
        "expected failure when OPENAI_API_KEY is not set"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("OPENAI_API_KEY"),
        "expected error to mention OPENAI_API_KEY, got: {}",
        stderr
    );
}

#[test]
fn cli_prompt_and_image_conflict() {
    let output = run_in_tempdir(&["-p", "x", "--image", "eq.png"]);
    assert!(!output.status.success());
}

#[test]
fn segment_reads_stdin_and_prints_json_lines() {
    let output = run_with_stdin(&["segment"], "Solve: $$x=1$$ done.");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"{"kind":"PlainText","body":"Solve:"}"#,
            r#"{"kind":"DisplayMath","body":"x=1"}"#,
            r#"{"kind":"PlainText","body":"done."}"#,
        ]
    );
}

#[test]
fn segment_reads_file() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let path = tmp.path().join("reply.txt");
    std::fs::write(&path, "(x = 5)").expect("write reply");
    let output = bin()
        .arg("segment")
        .arg(&path)
        .current_dir(tmp.path())
        .output()
        .expect("binary not found - run cargo build first");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"kind":"DisplayMath","body":"x = 5"}"#
    );
}

#[test]
fn segment_missing_file_fails() {
    let output = run_in_tempdir(&["segment", "does-not-exist.txt"]);
    assert!(!output.status.success());
}

#[test]
fn normalize_discards_inline_math() {
    let output = run_in_tempdir(&["normalize", r"prefix \(x^2\) suffix"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "prefix $$ suffix"
    );
}

#[test]
fn config_works_without_api_key() {
    let output = run_in_tempdir(&["config"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("OPENAI_API_KEY"));
    assert!(stdout.contains("not set"));
    assert!(stdout.contains("gpt-4o"));
}

#[test]
fn completions_bash() {
    let output = run_in_tempdir(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("snap2solve"));
}

#[test]
fn segment_reconstruct_rewraps_math() {
    let output = run_with_stdin(&["segment", "--reconstruct"], "Let [ \\frac{1}{2} ] hold.");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "Let\n$$ \\frac{1}{2} $$\nhold."
    );
}
