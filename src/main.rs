//! plush - a small Unix command shell
//!
//! Usage:
//!   plush             Start the interactive prompt
//!   plush -c "cmd"    Execute a single command line
//!   plush script      Execute a script file

mod cli;
mod repl;

use plush::Shell;
use std::env;
use std::fs;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = cli::parse_args(&args);

    if cli.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    if let Some(command) = cli.command {
        return run_command(&command);
    }

    if let Some(script) = cli.script {
        return run_script(&script);
    }

    ExitCode::from(repl::run() as u8)
}

/// Execute a single command line, exiting with its last foreground
/// status.
fn run_command(command: &str) -> ExitCode {
    let mut shell = Shell::new();
    shell.run_line(command);
    ExitCode::from(shell.last_status() as u8)
}

/// Execute a script file line by line. Blank lines and `#` comments are
/// skipped; errors are isolated per line.
fn run_script(path: &str) -> ExitCode {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("plush: {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut shell = Shell::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        shell.run_line(trimmed);
    }

    ExitCode::from(shell.last_status() as u8)
}
