use std::io;

use thiserror::Error;

use crate::process::{ProcessHandle, Termination};

/// Conditions that break the supervision contract. None of them are recoverable:
/// once one occurs the state of every target is suspect.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("failed to start probe {program}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to poll for finished probes")]
    Reap(#[source] io::Error),
    #[error("probe process {handle} did not exit normally ({termination})")]
    AbnormalTermination {
        handle: ProcessHandle,
        termination: Termination,
    },
    #[error("failed to draw the dashboard")]
    Render(#[source] io::Error),
}
