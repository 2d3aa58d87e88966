//! End-to-end tests for the `jslex` binary.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

fn jslex(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_jslex"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("JSLEX_CHUNK_SIZE")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn jslex");
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn tokenizes_a_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("input.js");
    fs::write(&path, "x = y / 2;\n").unwrap();

    let output = jslex(&[path.to_str().unwrap()], b"");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "0\tIdentifier\tx\n\
         2\tPunctuator\t=\n\
         4\tIdentifier\ty\n\
         6\tPunctuator\t/\n\
         8\tNumeric\t2\n\
         9\tPunctuator\t;\n\
         10\tLineTerminator\t\\n\n\
         # 11 tokens (7 printed), 11 bytes: end of input\n"
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn reads_stdin_when_path_is_dash() {
    let output = jslex(&["-", "--all"], b"a /b/g");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "0\tIdentifier\ta\n\
         1\tWhitespace\t \n\
         2\tPunctuator\t/\n\
         3\tIdentifier\tb\n\
         4\tPunctuator\t/\n\
         5\tIdentifier\tg\n\
         # 6 tokens (6 printed), 6 bytes: end of input\n"
    );
}

#[test]
fn malformed_input_exits_with_one() {
    let output = jslex(&[], b"a = `open");
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).ends_with("unterminated template literal starting at byte 4\n"));
    assert_eq!(
        String::from_utf8(output.stderr).unwrap(),
        "error: unterminated template literal starting at byte 4\n"
    );
}

#[test]
fn missing_file_exits_with_two() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.js");
    let output = jslex(&[path.to_str().unwrap()], b"");
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.starts_with("error: cannot open "), "{stderr}");
}

#[test]
fn chunk_size_and_release_keep_output_stable() {
    let source = b"function f(){}/1/g; `a${ {b: 1} }c`\n";
    let baseline = jslex(&[], source);
    let tiny = jslex(&["--chunk-size", "1", "--release"], source);
    assert!(baseline.status.success());
    assert_eq!(stdout(&baseline), stdout(&tiny));

    let mut child = Command::new(env!("CARGO_BIN_EXE_jslex"))
        .env("JSLEX_CHUNK_SIZE", "3")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(source).unwrap();
    let from_env = child.wait_with_output().unwrap();
    assert_eq!(stdout(&baseline), stdout(&from_env));
}
