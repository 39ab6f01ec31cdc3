//! The **port** between the scheduler and the operating system's process table.
//!
//! The scheduler never touches processes directly. It starts probes through
//! [`ProcessControl::spawn_detached`] and collects finished ones through
//! [`ProcessControl::poll_any`], which must never block: it reports what has
//! already finished and nothing else.
//!
//! [`os::OsProcesses`] is the production implementation. Tests swap in a
//! scripted table so the scheduler can be driven tick by tick.

use std::fmt;
use std::thread;
use std::time::Duration;

use crate::error::SupervisorError;
use crate::launcher::ProbeCommand;

#[cfg(unix)]
pub mod os;
#[cfg(test)]
pub(crate) mod scripted;

/// Opaque identifier of a running child (its pid on unix).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProcessHandle(pub u32);

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a reaped child ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Normal exit with a status code.
    Exited(i32),
    /// Killed by a signal.
    Signaled(i32),
    /// Any other raw wait status.
    Other(i32),
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exited(code) => write!(f, "exited with code {code}"),
            Termination::Signaled(signal) => write!(f, "killed by signal {signal}"),
            Termination::Other(status) => write!(f, "raw wait status {status:#x}"),
        }
    }
}

/// Result of one non-blocking poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Poll {
    /// Children exist but none has finished.
    Idle,
    /// There are no children at all.
    NoChildren,
    Reaped {
        handle: ProcessHandle,
        termination: Termination,
    },
}

pub trait ProcessControl {
    /// Starts `command` with stdin, stdout and stderr detached from ours.
    fn spawn_detached(&mut self, command: &ProbeCommand) -> Result<ProcessHandle, SupervisorError>;

    /// Collects one finished child, if any, without waiting.
    fn poll_any(&mut self) -> Result<Poll, SupervisorError>;
}

/// The tick sleep.
pub trait Ticker {
    fn wait(&mut self, interval: Duration);
}

/// Sleeps the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadTicker;

impl Ticker for ThreadTicker {
    fn wait(&mut self, interval: Duration) {
        thread::sleep(interval);
    }
}
