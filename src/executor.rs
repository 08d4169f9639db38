//! Executor: runs a pipeline of external programs
//!
//! Every stage becomes its own process. Adjacent stages are connected by
//! close-on-exec pipes, so each child keeps only the two ends it was wired
//! to; the parent closes its copies as soon as a stage has been spawned and
//! then waits for every stage before returning.

use crate::parser::Pipeline;
use crate::redirect::{Redirect, RedirectKind, Stage};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::OwnedFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use thiserror::Error;

/// Mode for files created by output redirection
pub const OUTPUT_FILE_MODE: u32 = 0o644;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("pipe: {0}")]
    Pipe(#[from] nix::Error),
}

/// Why a single stage did not run. Never fatal to sibling stages.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("empty command in pipeline")]
    EmptyCommand,
    /// The program could not be found or executed
    #[error("{0}: command not found")]
    NotFound(String),
    #[error("{}: {source}", .path.display())]
    Redirect { path: PathBuf, source: io::Error },
    #[error("wait: {0}")]
    Wait(io::Error),
}

/// Where one standard stream of a stage comes from or goes to
#[derive(Debug)]
pub enum Wiring {
    /// Share the interpreter's own stream
    Inherit,
    /// One end of a pipe to a neighbouring stage
    Pipe(OwnedFd),
    /// A redirected file
    File(File),
}

impl Wiring {
    fn into_stdio(self) -> Stdio {
        match self {
            Wiring::Inherit => Stdio::inherit(),
            Wiring::Pipe(fd) => Stdio::from(fd),
            Wiring::File(file) => Stdio::from(file),
        }
    }
}

/// Lifecycle of one stage: Pending -> Running -> Exited
#[derive(Debug)]
pub enum StageState {
    Pending,
    Running(Child),
    Exited(ExitStatus),
    /// The stage could not be started (or waited on)
    Failed(StageError),
    /// An empty stage; nothing was spawned
    Rejected,
}

impl StageState {
    /// Block until a running stage terminates
    pub fn wait(self) -> StageState {
        match self {
            StageState::Running(mut child) => {
                let pid = child.id();
                match child.wait() {
                    Ok(status) => {
                        log::debug!("pid {} exited: {}", pid, status);
                        StageState::Exited(status)
                    }
                    Err(e) => StageState::Failed(StageError::Wait(e)),
                }
            }
            other => other,
        }
    }

    pub fn exit_status(&self) -> Option<ExitStatus> {
        match self {
            StageState::Exited(status) => Some(*status),
            _ => None,
        }
    }
}

/// Create a pipe whose ends are not inherited across exec
#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
fn cloexec_pipe() -> Result<(OwnedFd, OwnedFd), ExecError> {
    use nix::fcntl::OFlag;
    Ok(nix::unistd::pipe2(OFlag::O_CLOEXEC)?)
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
fn cloexec_pipe() -> Result<(OwnedFd, OwnedFd), ExecError> {
    use nix::fcntl::{fcntl, FcntlArg, FdFlag};
    use std::os::fd::AsRawFd;
    let (read, write) = nix::unistd::pipe()?;
    fcntl(read.as_raw_fd(), FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))?;
    fcntl(write.as_raw_fd(), FcntlArg::F_SETFD(FdFlag::FD_CLOEXEC))?;
    Ok((read, write))
}

fn open_redirect(redirect: &Redirect) -> Result<File, StageError> {
    let opened = match redirect.kind {
        RedirectKind::Output => OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(OUTPUT_FILE_MODE)
            .open(&redirect.path),
        RedirectKind::Input => File::open(&redirect.path),
    };
    opened.map_err(|source| StageError::Redirect {
        path: redirect.path.clone(),
        source,
    })
}

/// Apply a stage's redirect on top of its pipe wiring. The redirect wins;
/// the displaced pipe end is dropped (closed) here.
fn apply_redirect(
    redirect: Option<&Redirect>,
    stdin: Wiring,
    stdout: Wiring,
) -> Result<(Wiring, Wiring), StageError> {
    let Some(redirect) = redirect else {
        return Ok((stdin, stdout));
    };

    let file = Wiring::File(open_redirect(redirect)?);
    match redirect.kind {
        RedirectKind::Input => {
            if matches!(stdin, Wiring::Pipe(_)) {
                log::debug!("< {} overrides pipe input", redirect.path.display());
            }
            Ok((file, stdout))
        }
        RedirectKind::Output => {
            if matches!(stdout, Wiring::Pipe(_)) {
                log::debug!("> {} overrides pipe output", redirect.path.display());
            }
            Ok((stdin, file))
        }
    }
}

fn report(error: StageError) -> StageState {
    eprintln!("{}", error);
    StageState::Failed(error)
}

/// Start one stage with the given stdin source and stdout sink.
///
/// Any failure is printed and returned as the stage's state; the wiring is
/// dropped either way, so no descriptor outlives this call in the parent.
pub fn spawn_stage(stage: &Stage, stdin: Wiring, stdout: Wiring) -> StageState {
    let Some(program) = stage.program() else {
        eprintln!("{}", StageError::EmptyCommand);
        return StageState::Rejected;
    };

    let (stdin, stdout) = match apply_redirect(stage.redirect.as_ref(), stdin, stdout) {
        Ok(wiring) => wiring,
        Err(e) => return report(e),
    };

    let mut command = Command::new(program);
    command
        .args(&stage.argv[1..])
        .stdin(stdin.into_stdio())
        .stdout(stdout.into_stdio());

    match command.spawn() {
        Ok(child) => {
            log::debug!("spawned {:?} as pid {}", stage.argv, child.id());
            StageState::Running(child)
        }
        Err(e) => {
            log::debug!("exec {}: {}", program, e);
            report(StageError::NotFound(program.to_string()))
        }
    }
}

/// Run every stage of a pipeline concurrently and wait for all of them.
///
/// Exit statuses are returned for inspection but carry no meaning for the
/// interpreter. Only pipe creation failure aborts the whole pipeline.
pub fn run_pipeline(pipeline: &Pipeline) -> Result<Vec<StageState>, ExecError> {
    let n = pipeline.len();

    // readers[i] feeds stage i+1, writers[i] drains stage i
    let mut readers: Vec<Option<OwnedFd>> = Vec::with_capacity(n.saturating_sub(1));
    let mut writers: Vec<Option<OwnedFd>> = Vec::with_capacity(n.saturating_sub(1));
    for _ in 1..n {
        let (read, write) = cloexec_pipe()?;
        readers.push(Some(read));
        writers.push(Some(write));
    }

    let mut states: Vec<StageState> = (0..n).map(|_| StageState::Pending).collect();
    for (i, slot) in pipeline.stages.iter().enumerate() {
        let stdin = match i.checked_sub(1).and_then(|prev| readers[prev].take()) {
            Some(fd) => Wiring::Pipe(fd),
            None => Wiring::Inherit,
        };
        let stdout = match writers.get_mut(i).and_then(Option::take) {
            Some(fd) => Wiring::Pipe(fd),
            None => Wiring::Inherit,
        };

        states[i] = match slot {
            Some(stage) => spawn_stage(stage, stdin, stdout),
            None => {
                eprintln!("{}", StageError::EmptyCommand);
                StageState::Rejected
            }
        };
    }

    // Every end has been handed to a stage or dropped with it
    debug_assert!(readers.iter().chain(writers.iter()).all(Option::is_none));
    drop(readers);
    drop(writers);

    Ok(states.into_iter().map(StageState::wait).collect())
}
