// End-to-end checks of the fail-fast paths of the binary. None of these
// reach the network.

use std::io::Write;
use std::process::{Command, Output};

fn run(args: &[&str], api_key: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sonar-tokens"));
    cmd.args(args)
        .env_remove("SONARAPI_KEY")
        // point at a closed port in case a request slips through
        .env("SONARAPI_URL", "http://127.0.0.1:9/chat/completions");
    if let Some(key) = api_key {
        cmd.env("SONARAPI_KEY", key);
    }
    cmd.output().expect("failed to run binary")
}

#[test]
fn missing_api_key_exits_1() {
    let out = run(&["--file", "does-not-exist.txt"], None);
    assert_eq!(out.status.code(), Some(1));
    // the key is checked before the file is opened
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("SONARAPI_KEY"), "stderr: {stderr}");
    assert!(!stderr.contains("does-not-exist.txt"), "stderr: {stderr}");
}

#[test]
fn empty_api_key_exits_1() {
    let out = run(&["--file", "does-not-exist.txt"], Some(""));
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("SONARAPI_KEY"));
}

#[test]
fn unreadable_file_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");

    let out = run(&["--file", path.to_str().unwrap()], Some("test-key"));
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("missing.txt"));
}

#[test]
fn file_without_questions_exits_1() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "  \n---\n\n---  ").unwrap();

    // single-dash long form, as in `-file questions.txt`
    let out = run(&["-file", file.path().to_str().unwrap()], Some("test-key"));
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("no questions found"));
    // nothing was asked
    assert!(!String::from_utf8_lossy(&out.stdout).contains("Question:"));
}

#[test]
fn failed_questions_still_exit_0() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "first---second").unwrap();

    let out = run(
        &["-f", file.path().to_str().unwrap(), "--timeout", "5"],
        Some("test-key"),
    );
    assert_eq!(out.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.matches("Error:").count(), 2);
    assert!(stdout.contains("Answered 0 of 2 questions"));
    assert!(stdout.contains("Average completion tokens: 0.00"));
}
