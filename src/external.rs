//! Running programs that are not builtins: fork, exec in the child, wait in
//! the parent.

use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::libc::{self, c_char};
use nix::unistd::{ForkResult, Pid, fork, write};
use std::ffi::{CString, NulError};
use std::ptr;
use std::fmt;
use thiserror::Error;

/// Status the child exits with when the program image cannot be loaded.
pub const EXEC_FAILURE_STATUS: i32 = 1;

/// Error starting or waiting for an external program.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// No command name was given.
    #[error("no command to run")]
    EmptyCommand,

    /// An argument cannot be passed to the OS.
    #[error("argument contains a nul byte")]
    NulByteInArgument(#[from] NulError),

    /// `fork` failed; no child exists.
    #[error("{}", .0.desc())]
    Fork(#[source] Errno),

    /// `waitpid` failed; the child's fate is unknown.
    #[error("{}", .0.desc())]
    Wait(#[source] Errno),
}

/// How a child process ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChildOutcome {
    Exited(i32),
    Signaled { signal: Signal, core_dumped: bool },
}

impl ChildOutcome {
    /// Shell-style status: the exit code, or 128 plus the signal number.
    pub fn code(self) -> i32 {
        match self {
            ChildOutcome::Exited(code) => code,
            ChildOutcome::Signaled { signal, .. } => 128 + signal as i32,
        }
    }
}

impl fmt::Display for ChildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildOutcome::Exited(code) => write!(f, "exited with status {code}"),
            ChildOutcome::Signaled {
                signal,
                core_dumped,
            } => {
                write!(f, "killed by {}", signal.as_str())?;
                if *core_dumped {
                    f.write_str(" (core dumped)")?;
                }
                Ok(())
            }
        }
    }
}

/// Runs `args[0]` with argument vector `args` and blocks until it has exited
/// or been killed by a signal.
///
/// The program is looked up the way `execvp` does it. A child that merely
/// stops does not end the wait. If the program cannot be executed, the child
/// prints the reason to standard error and exits with
/// [`EXEC_FAILURE_STATUS`].
pub fn spawn_and_wait(args: &[&str]) -> Result<ChildOutcome, LaunchError> {
    if args.is_empty() {
        return Err(LaunchError::EmptyCommand);
    }
    // Everything the child needs is allocated before forking.
    let argv = args
        .iter()
        .map(|arg| CString::new(*arg))
        .collect::<Result<Vec<_>, _>>()?;
    let argv_ptrs = argv
        .iter()
        .map(|arg| arg.as_ptr())
        .chain([ptr::null()])
        .collect::<Vec<*const c_char>>();

    // SAFETY: the child does nothing but exec, or write a message and _exit.
    match unsafe { fork() } {
        Ok(ForkResult::Child) => exec_child(&argv_ptrs),
        Ok(ForkResult::Parent { child }) => {
            log::debug!("started {} as pid {child}", args[0]);
            let outcome = wait_for_exit(child)?;
            log::debug!("pid {child} {outcome}");
            Ok(outcome)
        }
        Err(errno) => Err(LaunchError::Fork(errno)),
    }
}

/// Child side of the fork. `argv` is null-terminated and outlives the call.
fn exec_child(argv: &[*const c_char]) -> ! {
    // SAFETY: every pointer but the last refers to a live CString owned by
    // the caller, and the array ends with a null pointer.
    unsafe { libc::execvp(argv[0], argv.as_ptr()) };
    let errno = Errno::last();
    let stderr = std::io::stderr();
    for part in [b"lsh: ".as_slice(), errno.desc().as_bytes(), b"\n".as_slice()] {
        let _ = write(&stderr, part);
    }
    // Never return into the parent's code, not even through destructors.
    // SAFETY: _exit ends the process without running atexit handlers or
    // flushing stdio buffers copied from the parent.
    unsafe { libc::_exit(EXEC_FAILURE_STATUS) }
}

fn wait_for_exit(child: Pid) -> Result<ChildOutcome, LaunchError> {
    loop {
        match waitpid(child, Some(WaitPidFlag::WUNTRACED)) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(ChildOutcome::Exited(code)),
            Ok(WaitStatus::Signaled(_, signal, core_dumped)) => {
                return Ok(ChildOutcome::Signaled {
                    signal,
                    core_dumped,
                });
            }
            Ok(status) => log::debug!("pid {child} not finished yet: {status:?}"),
            Err(Errno::EINTR) => continue,
            Err(errno) => return Err(LaunchError::Wait(errno)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_true_and_false() {
        assert_eq!(spawn_and_wait(&["true"]).unwrap(), ChildOutcome::Exited(0));
        assert_eq!(spawn_and_wait(&["false"]).unwrap(), ChildOutcome::Exited(1));
    }

    #[test]
    fn test_arguments_passed_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out");
        let script = format!("printf '%s|' \"$0\" \"$@\" > '{}'", file.display());

        let outcome = spawn_and_wait(&["sh", "-c", &script, "zero", "a", "b  c"]).unwrap();
        assert_eq!(outcome, ChildOutcome::Exited(0));
        assert_eq!(fs::read_to_string(&file).unwrap(), "zero|a|b  c|");
    }

    #[test]
    fn test_exit_code_is_reported() {
        let outcome = spawn_and_wait(&["sh", "-c", "exit 7"]).unwrap();
        assert_eq!(outcome, ChildOutcome::Exited(7));
        assert_eq!(outcome.code(), 7);
    }

    #[test]
    fn test_unknown_program_fails_in_child() {
        let outcome = spawn_and_wait(&["lsh-test-no-such-program-xyz"]).unwrap();
        assert_eq!(outcome, ChildOutcome::Exited(EXEC_FAILURE_STATUS));
    }

    #[test]
    fn test_non_executable_fails_in_child() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();
        let outcome = spawn_and_wait(&[&path]).unwrap();
        assert_eq!(outcome, ChildOutcome::Exited(EXEC_FAILURE_STATUS));
    }

    #[test]
    fn test_signaled_child() {
        let outcome = spawn_and_wait(&["sh", "-c", "kill -KILL $$"]).unwrap();
        assert_eq!(
            outcome,
            ChildOutcome::Signaled {
                signal: Signal::SIGKILL,
                core_dumped: false,
            }
        );
        assert_eq!(outcome.code(), 137);
        assert_eq!(outcome.to_string(), "killed by SIGKILL");
    }

    #[test]
    fn test_stopped_child_is_waited_for() {
        // The child stops itself once; the wait must go on until it exits.
        let outcome =
            spawn_and_wait(&["sh", "-c", "(sleep 1; kill -CONT $$) & kill -STOP $$; exit 3"])
                .unwrap();
        assert_eq!(outcome, ChildOutcome::Exited(3));
    }

    #[test]
    fn test_nul_byte_is_rejected_before_fork() {
        let err = spawn_and_wait(&["echo", "a\0b"]).unwrap_err();
        assert!(matches!(err, LaunchError::NulByteInArgument(_)));
    }

    #[test]
    fn test_empty_command() {
        assert!(matches!(
            spawn_and_wait(&[]).unwrap_err(),
            LaunchError::EmptyCommand
        ));
    }
}
