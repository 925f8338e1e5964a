//! Common helpers for plush integration tests

use assert_cmd::Command;

/// The plush binary, ready for argument and stdin configuration.
pub fn plush() -> Command {
    Command::cargo_bin("plush").unwrap()
}

/// Run one command line via `plush -c` and return its captured stdout.
#[allow(dead_code)]
pub fn run(line: &str) -> String {
    let output = plush().args(["-c", line]).output().unwrap();
    String::from_utf8_lossy(&output.stdout).into_owned()
}
