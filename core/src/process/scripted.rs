//! In-memory process table driven by a virtual clock.
//!
//! Every probe is matched to a [`Script`] by the last argument of its
//! command (the target address). Time only moves when the paired
//! [`ScriptedTicker`] waits, one unit per tick.

use std::cell::Cell;
use std::collections::HashMap;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use super::{Poll, ProcessControl, ProcessHandle, Termination, Ticker};
use crate::error::SupervisorError;
use crate::launcher::ProbeCommand;

#[derive(Clone, Copy, Debug)]
pub struct Script {
    /// Ticks until the process finishes; `None` never finishes.
    runs_for: Option<u64>,
    termination: Termination,
}

impl Script {
    /// Finishes during the first sleep after launch.
    pub fn exits(code: i32) -> Self {
        Self::exits_after(1, code)
    }

    pub fn exits_after(ticks: u64, code: i32) -> Self {
        Self {
            runs_for: Some(ticks),
            termination: Termination::Exited(code),
        }
    }

    pub fn killed(signal: i32) -> Self {
        Self {
            runs_for: Some(1),
            termination: Termination::Signaled(signal),
        }
    }

    pub fn never() -> Self {
        Self {
            runs_for: None,
            termination: Termination::Exited(0),
        }
    }
}

struct Live {
    handle: ProcessHandle,
    finishes_at: Option<u64>,
    termination: Termination,
}

pub struct ScriptedProcesses {
    clock: Rc<Cell<u64>>,
    scripts: HashMap<String, Vec<Script>>,
    live: Vec<Live>,
    spawned: Vec<(ProcessHandle, ProbeCommand)>,
    next_pid: u32,
    refuse: bool,
    poll_errors: Vec<i32>,
}

impl ScriptedProcesses {
    pub fn new() -> Self {
        Self {
            clock: Rc::new(Cell::new(0)),
            scripts: HashMap::new(),
            live: Vec::new(),
            spawned: Vec::new(),
            next_pid: 100,
            refuse: false,
            poll_errors: Vec::new(),
        }
    }

    /// Script for every run against `address`. Unscripted addresses exit 0 after one tick.
    pub fn script(&mut self, address: &str, script: Script) {
        self.scripts.insert(address.to_string(), vec![script]);
    }

    /// One script per successive run against `address`; the last one repeats.
    pub fn script_runs(&mut self, address: &str, runs: Vec<Script>) {
        self.scripts.insert(address.to_string(), runs);
    }

    pub fn refuse_spawns(&mut self) {
        self.refuse = true;
    }

    /// Makes the next poll fail with `errno`.
    pub fn fail_next_poll(&mut self, errno: i32) {
        self.poll_errors.push(errno);
    }

    /// Adds a child nobody launched, finished and waiting to be reaped.
    pub fn adopt_stray(&mut self, pid: u32, termination: Termination) {
        self.live.push(Live {
            handle: ProcessHandle(pid),
            finishes_at: Some(self.clock.get()),
            termination,
        });
    }

    pub fn spawned(&self) -> &[(ProcessHandle, ProbeCommand)] {
        &self.spawned
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn ticker(&self) -> ScriptedTicker {
        ScriptedTicker {
            clock: Rc::clone(&self.clock),
            waits: Vec::new(),
        }
    }

    fn next_script(&mut self, address: &str) -> Script {
        match self.scripts.get_mut(address) {
            Some(runs) if runs.len() > 1 => runs.remove(0),
            Some(runs) => runs[0],
            None => Script::exits(0),
        }
    }
}

impl ProcessControl for ScriptedProcesses {
    fn spawn_detached(&mut self, command: &ProbeCommand) -> Result<ProcessHandle, SupervisorError> {
        if self.refuse {
            return Err(SupervisorError::Launch {
                program: command.program.display().to_string(),
                source: io::Error::from(io::ErrorKind::NotFound),
            });
        }

        let address = command.args.last().cloned().unwrap_or_default();
        let script = self.next_script(&address);
        let handle = ProcessHandle(self.next_pid);
        self.next_pid += 1;

        self.live.push(Live {
            handle,
            finishes_at: script.runs_for.map(|ticks| self.clock.get() + ticks),
            termination: script.termination,
        });
        self.spawned.push((handle, command.clone()));
        Ok(handle)
    }

    fn poll_any(&mut self) -> Result<Poll, SupervisorError> {
        if let Some(errno) = self.poll_errors.pop() {
            return Err(SupervisorError::Reap(io::Error::from_raw_os_error(errno)));
        }
        if self.live.is_empty() {
            return Ok(Poll::NoChildren);
        }

        let now = self.clock.get();
        let finished = self
            .live
            .iter()
            .position(|live| live.finishes_at.is_some_and(|at| at <= now));

        Ok(match finished {
            Some(idx) => {
                let live = self.live.remove(idx);
                Poll::Reaped {
                    handle: live.handle,
                    termination: live.termination,
                }
            }
            None => Poll::Idle,
        })
    }
}

pub struct ScriptedTicker {
    clock: Rc<Cell<u64>>,
    waits: Vec<Duration>,
}

impl ScriptedTicker {
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }
}

impl Ticker for ScriptedTicker {
    fn wait(&mut self, interval: Duration) {
        self.waits.push(interval);
        self.clock.set(self.clock.get() + 1);
    }
}
