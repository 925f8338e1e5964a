//! Process launching and file-descriptor plumbing.
//!
//! A pipeline executes left to right. The pipe linking a stage to its
//! successor is created before the stage forks; the child duplicates
//! its endpoints onto descriptors 0/1 and execs, while the parent
//! closes every pipe side the stage used and either waits for that
//! specific pid (foreground) or reports it and moves on (background).

use crate::ast::{Pipeline, RedirectKind, SeqOp, Stage};
use crate::shell::Shell;
use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{self, ForkResult};
use std::convert::Infallible;
use std::ffi::CString;
use std::fs::OpenOptions;
use std::os::fd::{IntoRawFd, RawFd};
use thiserror::Error;

/// Ceiling on a stage's argument vector, checked at the exec boundary.
pub const MAX_ARGS: usize = 128;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("missing redirect target")]
    MissingRedirectTarget,
    #[error("too many arguments ({0})")]
    TooManyArgs(usize),
    #[error("{path}: {source}")]
    Redirect {
        path: String,
        source: std::io::Error,
    },
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Sys(#[from] Errno),
    #[error("argument contains a NUL byte")]
    Nul(#[from] std::ffi::NulError),
}

/// Where a stage's standard input or output is wired.
///
/// A pipe endpoint carries the descriptor to install (`use_fd`) and,
/// when the opposite side is still open in the forked child, that side
/// as `close_fd`. An unclosed opposite side would hold the pipe's EOF
/// hostage.
#[derive(Debug)]
enum Endpoint {
    Inherited,
    File {
        path: String,
        kind: RedirectKind,
    },
    Pipe {
        use_fd: RawFd,
        close_fd: Option<RawFd>,
    },
}

impl Endpoint {
    /// Close the pipe side this endpoint holds in the interpreter.
    /// Called after forking the stage that consumed it, and equally when
    /// the stage is skipped (builtin, no-op, or failed), so the rest of
    /// the pipeline sees EOF instead of a stalled descriptor.
    fn release(&self) {
        if let Endpoint::Pipe { use_fd, .. } = self {
            let _ = unistd::close(*use_fd);
        }
    }

    /// In the child: install this endpoint on `fd` (0 or 1).
    fn install(&self, fd: RawFd) -> Result<(), ExecError> {
        match self {
            Endpoint::Inherited => Ok(()),
            Endpoint::File { path, kind } => {
                let file = match kind {
                    RedirectKind::Input => OpenOptions::new().read(true).open(path),
                    RedirectKind::Output => OpenOptions::new()
                        .write(true)
                        .create(true)
                        .truncate(true)
                        .open(path),
                    RedirectKind::Append => {
                        OpenOptions::new().append(true).create(true).open(path)
                    }
                }
                .map_err(|source| ExecError::Redirect {
                    path: path.clone(),
                    source,
                })?;
                let raw = file.into_raw_fd();
                unistd::dup2(raw, fd)?;
                unistd::close(raw)?;
                Ok(())
            }
            Endpoint::Pipe { use_fd, close_fd } => {
                if let Some(other) = close_fd {
                    unistd::close(*other)?;
                }
                unistd::dup2(*use_fd, fd)?;
                unistd::close(*use_fd)?;
                Ok(())
            }
        }
    }
}

impl Shell {
    /// Execute one sequence unit.
    pub(crate) fn run_pipeline(&mut self, pipeline: &Pipeline) {
        // Read side of the link feeding the next stage
        let mut carry: Option<RawFd> = None;

        for (i, stage) in pipeline.stages.iter().enumerate() {
            // The link to the next stage must exist before this stage
            // launches: the producer needs the write side ready.
            let link = if i + 1 < pipeline.stages.len() {
                match unistd::pipe() {
                    Ok((read, write)) => Some((read.into_raw_fd(), write.into_raw_fd())),
                    Err(err) => {
                        eprintln!("plush: pipe: {err}");
                        if let Some(fd) = carry.take() {
                            let _ = unistd::close(fd);
                        }
                        return;
                    }
                }
            } else {
                None
            };

            let input = match carry.take() {
                Some(fd) => Endpoint::Pipe {
                    use_fd: fd,
                    close_fd: None,
                },
                None => Endpoint::Inherited,
            };
            let output = match link {
                Some((read, write)) => Endpoint::Pipe {
                    use_fd: write,
                    close_fd: Some(read),
                },
                None => Endpoint::Inherited,
            };
            carry = link.map(|(read, _)| read);

            if let Err(err) = self.run_stage(stage, pipeline.op, input, output) {
                eprintln!("plush: {err}");
            }
        }
    }

    /// Run one stage and release whatever pipe sides it held, whether it
    /// launched or not.
    fn run_stage(
        &mut self,
        stage: &Stage,
        op: SeqOp,
        mut input: Endpoint,
        mut output: Endpoint,
    ) -> Result<(), ExecError> {
        let result = self.launch_stage(stage, op, &mut input, &mut output);
        input.release();
        output.release();
        result
    }

    fn launch_stage(
        &mut self,
        stage: &Stage,
        op: SeqOp,
        input: &mut Endpoint,
        output: &mut Endpoint,
    ) -> Result<(), ExecError> {
        // File redirection replaces a pipe link; the displaced side is
        // closed at once so the neighbor sees EOF rather than a stall.
        for redirect in &stage.redirects {
            if redirect.target.is_empty() {
                return Err(ExecError::MissingRedirectTarget);
            }
            let endpoint = Endpoint::File {
                path: redirect.target.clone(),
                kind: redirect.kind,
            };
            match redirect.kind {
                RedirectKind::Input => {
                    input.release();
                    *input = endpoint;
                }
                RedirectKind::Output | RedirectKind::Append => {
                    output.release();
                    *output = endpoint;
                }
            }
        }

        // Builtins and the null command never fork; their stage only
        // needs its endpoint cleanup.
        match stage.argv.first().map(String::as_str) {
            None | Some(":") => return Ok(()),
            Some("cd") => {
                self.builtin_cd(&stage.argv[1..]);
                return Ok(());
            }
            _ => {}
        }

        if stage.argv.len() > MAX_ARGS {
            return Err(ExecError::TooManyArgs(stage.argv.len()));
        }
        let argv: Vec<CString> = stage
            .argv
            .iter()
            .map(|arg| CString::new(arg.as_str()))
            .collect::<Result<_, _>>()?;

        match unsafe { unistd::fork() }? {
            ForkResult::Child => self.exec_child(&argv, input, output),
            ForkResult::Parent { child } => {
                match op {
                    SeqOp::Background => {
                        let id = self.next_job_id;
                        self.next_job_id += 1;
                        eprintln!("[{id}] {child}");
                    }
                    SeqOp::Foreground => {
                        // Wait for this specific pid: an unrelated
                        // backgrounded child exiting at the same moment
                        // must not satisfy the wait.
                        match waitpid(child, None) {
                            Ok(WaitStatus::Exited(_, code)) => self.last_status = code,
                            Ok(WaitStatus::Signaled(_, signal, _)) => {
                                self.last_status = 128 + signal as i32;
                            }
                            Ok(_) => {}
                            Err(err) => eprintln!("plush: wait: {err}"),
                        }
                    }
                }
                Ok(())
            }
        }
    }

    /// The forked child: wire descriptors, enter the tracked working
    /// directory, exec. Never returns; a failure is reported on stderr
    /// and the child `_exit`s without touching interpreter state.
    fn exec_child(&self, argv: &[CString], input: &Endpoint, output: &Endpoint) -> ! {
        let err = match self.exec_image(argv, input, output) {
            Ok(never) => match never {},
            Err(err) => err,
        };
        eprintln!("plush: {}: {err}", argv[0].to_string_lossy());
        let status = match err {
            ExecError::Sys(Errno::ENOENT) => 127,
            ExecError::Sys(_) => 126,
            _ => 1,
        };
        unsafe { libc::_exit(status) }
    }

    fn exec_image(
        &self,
        argv: &[CString],
        input: &Endpoint,
        output: &Endpoint,
    ) -> Result<Infallible, ExecError> {
        // Enter the tracked directory first so redirect targets resolve
        // relative to it.
        std::env::set_current_dir(&self.cwd)?;
        input.install(libc::STDIN_FILENO)?;
        output.install(libc::STDOUT_FILENO)?;
        Ok(unistd::execvp(&argv[0], argv)?)
    }
}
