//! Interpreter context and the per-line driver.

use crate::lexer;
use crate::parser;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;
use std::path::PathBuf;

/// Interpreter state that survives across lines.
///
/// `cd` mutates only the tracked working directory held here; children
/// enter it at launch. Keeping it explicit instead of calling `chdir`
/// in the interpreter itself makes the builtin testable without
/// touching process-wide state.
pub struct Shell {
    /// Tracked current working directory
    pub(crate) cwd: PathBuf,
    /// Home directory for `cd` and `~` expansion
    pub(crate) home: String,
    /// Exit status of the most recent foreground wait
    pub(crate) last_status: i32,
    /// Number printed with the next background notification
    pub(crate) next_job_id: usize,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/".to_string());
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        Shell {
            cwd,
            home,
            last_status: 0,
            next_job_id: 1,
        }
    }

    /// Exit status of the most recent foreground wait.
    pub fn last_status(&self) -> i32 {
        self.last_status
    }

    /// Run one line: tokenize, parse into sequence units, execute each
    /// unit in order. Errors are reported per unit; a failed unit never
    /// stops the ones after it.
    pub fn run_line(&mut self, line: &str) {
        let tokens = match lexer::lex(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                eprintln!("plush: {err}");
                self.last_status = 2;
                return;
            }
        };

        for pipeline in parser::parse(tokens) {
            self.run_pipeline(&pipeline);
        }
    }

    /// Collect any terminated background children without blocking.
    /// Their identities were reported once at spawn and are not tracked,
    /// so nothing is printed; this keeps long sessions free of zombies.
    pub fn reap_background(&mut self) {
        loop {
            match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::StillAlive) | Err(_) => break,
                Ok(_) => continue,
            }
        }
    }
}
