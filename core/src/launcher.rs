use std::fmt;
use std::path::PathBuf;

use netdiag_common::config::ProbeTable;
use netdiag_common::target::{Target, TargetKind};

use crate::error::SupervisorError;
use crate::process::{ProcessControl, ProcessHandle};

/// Fully resolved argument vector for one probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl fmt::Display for ProbeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// An outstanding probe: the child it runs in and how to read its exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeRun {
    pub handle: ProcessHandle,
    pub failure_code: i32,
}

/// Builds and starts probe commands from the configured command shapes.
#[derive(Clone, Debug)]
pub struct ProbeLauncher {
    probes: ProbeTable,
}

impl ProbeLauncher {
    pub fn new(probes: ProbeTable) -> Self {
        Self { probes }
    }

    /// Argument vector for `target`.
    ///
    /// Reachability: `program args.. address`.
    /// Name resolution: `program args.. lookup_name address`.
    pub fn command_for(&self, target: &Target) -> ProbeCommand {
        let spec = self.probes.get(target.kind);
        let mut args = spec.args.clone();
        if target.kind == TargetKind::NameResolution {
            args.push(self.probes.lookup_name.clone());
        }
        args.push(target.address.clone());

        ProbeCommand {
            program: spec.program.clone(),
            args,
        }
    }

    pub fn failure_code(&self, kind: TargetKind) -> i32 {
        self.probes.get(kind).failure_code
    }

    /// Starts one probe for an idle target.
    pub fn launch<P: ProcessControl>(
        &self,
        target: &Target,
        processes: &mut P,
    ) -> Result<ProbeRun, SupervisorError> {
        let command = self.command_for(target);
        let handle = processes.spawn_detached(&command)?;
        Ok(ProbeRun {
            handle,
            failure_code: self.failure_code(target.kind),
        })
    }
}
