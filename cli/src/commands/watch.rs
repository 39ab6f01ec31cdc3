use std::io;

use netdiag_common::config::Config;
use netdiag_common::success;
use netdiag_core::launcher::ProbeLauncher;
use netdiag_core::process::ThreadTicker;
use netdiag_core::process::os::OsProcesses;
use netdiag_core::registry::TargetRegistry;
use netdiag_core::scheduler::{Scheduler, SchedulerSettings};

use crate::commands::WatchArgs;
use crate::terminal::dashboard::Dashboard;

pub fn watch(mut config: Config, args: WatchArgs) -> anyhow::Result<()> {
    args.apply(&mut config);
    config.validate()?;

    let registry = TargetRegistry::new(config.targets.clone());
    let launcher = ProbeLauncher::new(config.probes.clone());
    let settings = SchedulerSettings::from_config(&config);

    success!(
        "Watching {} targets every {} ms",
        registry.len(),
        config.interval_ms
    );

    let mut scheduler = Scheduler::new(
        registry,
        launcher,
        settings,
        OsProcesses,
        Dashboard::new(io::stdout()),
        ThreadTicker,
    );

    match args.ticks {
        Some(ticks) => {
            scheduler.run_ticks(ticks)?;
            // Leave the last frame on screen below the rewound cursor.
            scheduler.render()?;
            Ok(())
        }
        None => match scheduler.run()? {},
    }
}
