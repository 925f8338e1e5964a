//! Integration tests for I/O redirection

#[path = "common/mod.rs"]
mod common;
use common::plush;

use predicates::prelude::*;
use std::fs;

#[test]
fn write_redirect_creates_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("out.txt");
    let path = path.to_str().unwrap();

    plush()
        .args(["-c", &format!("echo hi > {path}")])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(path).unwrap(), "hi\n");
}

#[test]
fn write_redirect_truncates_existing_content() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("out.txt");
    let path = path.to_str().unwrap();

    plush()
        .args(["-c", &format!("echo a-much-longer-first-line > {path}")])
        .assert()
        .success();
    plush()
        .args(["-c", &format!("echo short > {path}")])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(path).unwrap(), "short\n");
}

#[test]
fn append_redirect_keeps_existing_content() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("log.txt");
    let path = path.to_str().unwrap();

    plush()
        .args(["-c", &format!("echo one > {path}")])
        .assert()
        .success();
    plush()
        .args(["-c", &format!("echo two >> {path}")])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(path).unwrap(), "one\ntwo\n");
}

#[test]
fn input_redirect_feeds_stdin() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("in.txt");
    fs::write(&path, "data\n").unwrap();
    let path = path.to_str().unwrap();

    plush()
        .args(["-c", &format!("cat < {path}")])
        .assert()
        .success()
        .stdout("data\n");
}

#[test]
fn last_redirect_wins() {
    let tmp = tempfile::tempdir().unwrap();
    let first = tmp.path().join("first.txt");
    let second = tmp.path().join("second.txt");

    plush()
        .args([
            "-c",
            &format!(
                "echo hi > {} > {}",
                first.to_str().unwrap(),
                second.to_str().unwrap()
            ),
        ])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&second).unwrap(), "hi\n");
}

#[test]
fn file_redirect_wins_over_pipe() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("in.txt");
    fs::write(&path, "filed\n").unwrap();
    let path = path.to_str().unwrap();

    plush()
        .args(["-c", &format!("echo piped | cat < {path}")])
        .assert()
        .success()
        .stdout("filed\n");
}

#[test]
fn dangling_redirect_is_an_error() {
    plush()
        .args(["-c", "echo >"])
        .assert()
        .stdout("")
        .stderr(predicate::str::contains("missing redirect target"));
}

#[test]
fn dangling_redirect_does_not_abort_the_line() {
    plush()
        .args(["-c", "echo > ; echo ok"])
        .assert()
        .success()
        .stdout("ok\n")
        .stderr(predicate::str::contains("missing redirect target"));
}

#[test]
fn missing_input_file_fails_only_that_stage() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("absent.txt");
    let path = path.to_str().unwrap();

    plush()
        .args(["-c", &format!("cat < {path} ; echo after")])
        .assert()
        .success()
        .stdout("after\n")
        .stderr(predicate::str::contains("absent.txt"));
}

#[test]
fn words_after_redirect_target_stay_arguments() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("out.txt");
    let path = path.to_str().unwrap();

    plush()
        .args(["-c", &format!("echo a > {path} b")])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(path).unwrap(), "a b\n");
}
