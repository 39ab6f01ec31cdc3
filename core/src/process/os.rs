use std::io;
use std::process::{Command, Stdio};

use tracing::debug;

use super::{Poll, ProcessControl, ProcessHandle, Termination};
use crate::error::SupervisorError;
use crate::launcher::ProbeCommand;

/// Real child processes.
///
/// Reaping asks for *any* finished child of this process, so at most one
/// `OsProcesses` should be active per process, and nothing else in the
/// process should spawn children it expects to `wait` on.
#[derive(Debug, Default)]
pub struct OsProcesses;

impl ProcessControl for OsProcesses {
    fn spawn_detached(&mut self, command: &ProbeCommand) -> Result<ProcessHandle, SupervisorError> {
        let child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SupervisorError::Launch {
                program: command.program.display().to_string(),
                source,
            })?;

        // Dropping `Child` neither waits nor kills; `poll_any` reaps it by pid.
        let handle = ProcessHandle(child.id());
        debug!(pid = handle.0, argv = %command, "spawned probe");
        Ok(handle)
    }

    fn poll_any(&mut self) -> Result<Poll, SupervisorError> {
        let mut status: libc::c_int = 0;
        // SAFETY: `status` is a valid, writable c_int for the duration of the call.
        let pid = unsafe { libc::waitpid(-1, &mut status, libc::WNOHANG) };

        match pid {
            0 => Ok(Poll::Idle),
            -1 => {
                let err = io::Error::last_os_error();
                if err.raw_os_error() == Some(libc::ECHILD) {
                    Ok(Poll::NoChildren)
                } else {
                    Err(SupervisorError::Reap(err))
                }
            }
            pid => Ok(Poll::Reaped {
                handle: ProcessHandle(pid as u32),
                termination: decode_status(status),
            }),
        }
    }
}

fn decode_status(status: libc::c_int) -> Termination {
    if libc::WIFEXITED(status) {
        Termination::Exited(libc::WEXITSTATUS(status))
    } else if libc::WIFSIGNALED(status) {
        Termination::Signaled(libc::WTERMSIG(status))
    } else {
        Termination::Other(status)
    }
}
