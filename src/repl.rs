//! The interactive read loop: a thin wrapper that hands one line at a
//! time to the shell.

use plush::Shell;
use std::io::{self, BufRead, Write};

/// Prompt, read, run, repeat. End-of-input is the normal way out; the
/// loop also reaps finished background children between lines.
pub(crate) fn run() -> i32 {
    let mut shell = Shell::new();
    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    let mut line = String::new();

    loop {
        shell.reap_background();

        print!("$ ");
        let _ = io::stdout().flush();

        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => {
                // Ctrl-D / closed stdin
                println!();
                break;
            }
            Ok(_) => shell.run_line(&line),
            Err(err) => {
                eprintln!("plush: {err}");
                break;
            }
        }
    }

    0
}
