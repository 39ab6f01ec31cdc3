//! The supervisor loop.
//!
//! Each target is either idle or has exactly one probe outstanding. One tick:
//!
//! 1. draw the current ledger,
//! 2. launch a probe for every idle target,
//! 3. sleep for the tick interval,
//! 4. poll for finished children until none is ready, classifying each one
//!    into its owner's ledger and marking the owner idle,
//! 5. append `Pending` for every target still running,
//! 6. rewind the output so the next frame overwrites this one.
//!
//! Steps 4 and 5 together append exactly one symbol per target per tick,
//! however many polls step 4 takes. Probes run as separate OS processes, so
//! nothing here needs threads or locks; the sleep in step 3 is the only
//! place the loop blocks.

use std::convert::Infallible;
use std::time::Duration;

use netdiag_common::config::Config;
use netdiag_common::health::HealthSymbol;
use tracing::{trace, warn};

use crate::classifier::classify;
use crate::error::SupervisorError;
use crate::launcher::{ProbeLauncher, ProbeRun};
use crate::ledger::HistoryLedger;
use crate::process::{Poll, ProcessControl, ProcessHandle, Termination, Ticker};
use crate::registry::{TargetId, TargetRegistry};
use crate::render::{Frame, Layout, Renderer, Row};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub interval: Duration,
    /// Dashboard width in columns, labels included.
    pub display_width: usize,
    /// Ledger entries kept per target beyond the visible window.
    pub history_slack: usize,
}

impl SchedulerSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.interval(),
            display_width: config.width,
            history_slack: config.history_slack,
        }
    }
}

pub struct Scheduler<P, R, T> {
    registry: TargetRegistry,
    launcher: ProbeLauncher,
    ledger: HistoryLedger,
    /// `Some` exactly while the target has a probe outstanding.
    runs: Vec<Option<ProbeRun>>,
    layout: Layout,
    interval: Duration,
    ticks: u64,
    processes: P,
    renderer: R,
    ticker: T,
}

impl<P, R, T> Scheduler<P, R, T>
where
    P: ProcessControl,
    R: Renderer,
    T: Ticker,
{
    pub fn new(
        registry: TargetRegistry,
        launcher: ProbeLauncher,
        settings: SchedulerSettings,
        processes: P,
        renderer: R,
        ticker: T,
    ) -> Self {
        let layout = Layout::new(registry.label_width(), settings.display_width);
        let ledger = HistoryLedger::new(registry.len(), layout.window + settings.history_slack);
        let runs = vec![None; registry.len()];

        Self {
            registry,
            launcher,
            ledger,
            runs,
            layout,
            interval: settings.interval,
            ticks: 0,
            processes,
            renderer,
            ticker,
        }
    }

    /// Ticks until a fatal error occurs.
    pub fn run(&mut self) -> Result<Infallible, SupervisorError> {
        loop {
            self.tick()?;
        }
    }

    pub fn run_ticks(&mut self, count: u64) -> Result<(), SupervisorError> {
        for _ in 0..count {
            self.tick()?;
        }
        Ok(())
    }

    pub fn tick(&mut self) -> Result<(), SupervisorError> {
        self.render()?;
        self.launch_idle()?;
        self.ticker.wait(self.interval);
        self.reap_finished()?;
        self.sweep_pending();
        self.ticks += 1;
        self.renderer
            .rewind(self.registry.len())
            .map_err(SupervisorError::Render)
    }

    /// Draws the current state without changing it.
    pub fn render(&mut self) -> Result<(), SupervisorError> {
        let frame = snapshot(&self.registry, &self.ledger, self.layout);
        self.renderer.draw(&frame).map_err(SupervisorError::Render)
    }

    pub fn frame(&self) -> Frame<'_> {
        snapshot(&self.registry, &self.ledger, self.layout)
    }

    fn launch_idle(&mut self) -> Result<(), SupervisorError> {
        for (id, target) in self.registry.iter() {
            let slot = &mut self.runs[id.index()];
            if slot.is_none() {
                *slot = Some(self.launcher.launch(target, &mut self.processes)?);
            }
        }
        Ok(())
    }

    fn reap_finished(&mut self) -> Result<(), SupervisorError> {
        loop {
            let (handle, termination) = match self.processes.poll_any()? {
                Poll::Idle | Poll::NoChildren => return Ok(()),
                Poll::Reaped {
                    handle,
                    termination,
                } => (handle, termination),
            };

            let Termination::Exited(code) = termination else {
                return Err(SupervisorError::AbnormalTermination {
                    handle,
                    termination,
                });
            };

            let Some(id) = self.owner_of(handle) else {
                warn!(pid = handle.0, code, "reaped a child no target was waiting on");
                continue;
            };

            if let Some(run) = self.runs[id.index()].take() {
                let symbol = classify(code, run.failure_code);
                trace!(probe = %self.registry.get(id), pid = handle.0, code, ?symbol, "probe finished");
                self.ledger.append(id, symbol);
            }
        }
    }

    fn sweep_pending(&mut self) {
        for id in self.registry.ids() {
            if self.runs[id.index()].is_some() {
                self.ledger.append(id, HealthSymbol::Pending);
            }
        }
    }

    fn owner_of(&self, handle: ProcessHandle) -> Option<TargetId> {
        self.registry.ids().find(|id| {
            self.runs[id.index()].is_some_and(|run| run.handle == handle)
        })
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// The probe currently outstanding for `id`, if any.
    pub fn outstanding(&self, id: TargetId) -> Option<ProbeRun> {
        self.runs[id.index()]
    }

    pub fn processes(&self) -> &P {
        &self.processes
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }
}

fn snapshot<'a>(registry: &'a TargetRegistry, ledger: &HistoryLedger, layout: Layout) -> Frame<'a> {
    let rows = registry
        .iter()
        .map(|(id, target)| Row {
            target,
            symbols: ledger.recent_window(id, layout.window),
        })
        .collect();

    Frame { layout, rows }
}
