//! Commands interpreted inside the shell process.
//!
//! `cd` has to run in-process - a forked child changing directory would
//! change nothing for the next command - and `:` runs nothing at all.

use crate::shell::Shell;
use std::io;
use std::path::{Path, PathBuf};

impl Shell {
    /// The `cd` builtin. Mutates only the tracked working directory;
    /// children enter it at launch.
    pub(crate) fn builtin_cd(&mut self, args: &[String]) {
        let target = match args {
            [] => PathBuf::from(&self.home),
            // `~` and `~/rest` substitute the home directory
            [arg] if arg.starts_with('~') => {
                PathBuf::from(format!("{}{}", self.home, &arg[1..]))
            }
            [arg] => {
                let path = Path::new(arg);
                if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    self.cwd.join(path)
                }
            }
            _ => {
                eprintln!("plush: cd: too many arguments");
                self.last_status = 1;
                return;
            }
        };

        match resolve_dir(&target) {
            Ok(cwd) => {
                self.cwd = cwd;
                self.last_status = 0;
            }
            Err(err) => {
                eprintln!("plush: cd: {}: {}", target.display(), err);
                self.last_status = 1;
            }
        }
    }
}

/// Canonicalize the target and verify it is a directory.
fn resolve_dir(target: &Path) -> io::Result<PathBuf> {
    let canonical = target.canonicalize()?;
    if !canonical.is_dir() {
        return Err(io::Error::from_raw_os_error(libc::ENOTDIR));
    }
    Ok(canonical)
}
