//! Command-line argument handling and help text.

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parsed command-line arguments
pub(crate) struct CliArgs {
    pub(crate) command: Option<String>,
    pub(crate) script: Option<String>,
    pub(crate) help: bool,
    pub(crate) version: bool,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs {
        command: None,
        script: None,
        help: false,
        version: false,
    };

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "-c" => {
                // Everything after -c is the command
                if i + 1 < args.len() {
                    cli.command = Some(args[i + 1..].join(" "));
                    break;
                }
            }
            "--help" | "-h" => {
                cli.help = true;
            }
            "--version" | "-V" => {
                cli.version = true;
            }
            path => {
                // Assume it's a script file if not a flag
                if !path.starts_with('-') {
                    cli.script = Some(path.to_string());
                }
            }
        }
        i += 1;
    }

    cli
}

pub(crate) fn print_help() {
    println!(
        r#"plush {} - a small Unix command shell

USAGE:
    plush                   Start the interactive prompt
    plush -c <command>      Execute a single command line
    plush <script>          Execute a script file, line by line
    plush --help            Show this help message
    plush --version         Show version

SYNTAX:
    cmd a b                 Run cmd with arguments a and b
    cmd1 ; cmd2             Run cmd1, then cmd2
    cmd &                   Run cmd in the background
    cmd1 | cmd2             Pipe cmd1's output into cmd2
    cmd < file              Read standard input from file
    cmd > file              Write standard output to file (truncate)
    cmd >> file             Append standard output to file

BUILTINS:
    cd [dir]                Change directory (~ expands to $HOME)
    :                       Do nothing, successfully
"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("plush {}", VERSION);
}
