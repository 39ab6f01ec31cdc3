use std::thread;
use std::time::Duration;

use netdiag_common::config::ProbeTable;
use netdiag_common::health::HealthSymbol::{self, Failure, Pending, Success, Unknown};
use netdiag_common::target::Target;
use netdiag_core::SupervisorError;
use netdiag_core::launcher::ProbeLauncher;
use netdiag_core::process::os::OsProcesses;
use netdiag_core::process::{Poll, ProcessControl, ThreadTicker};
use netdiag_core::registry::TargetRegistry;
use netdiag_core::scheduler::{Scheduler, SchedulerSettings};
use netdiag_integration_tests::{Silent, exclusive_children, shell_probes};

const FAILURE_CODE: i32 = 1;

/// `$0` is the target address.
const SCRIPT: &str = r#"
case "$0" in
    ok) exit 0 ;;
    down) exit 1 ;;
    odd) exit 77 ;;
    slow) sleep 0.6; exit 0 ;;
    killed) kill -9 $$ ;;
    *) exit 99 ;;
esac
"#;

type OsScheduler = Scheduler<OsProcesses, Silent, ThreadTicker>;

fn scheduler(targets: Vec<Target>, probes: ProbeTable, interval: Duration) -> OsScheduler {
    let settings = SchedulerSettings {
        interval,
        display_width: 75,
        history_slack: 16,
    };
    Scheduler::new(
        TargetRegistry::new(targets),
        ProbeLauncher::new(probes),
        settings,
        OsProcesses,
        Silent::default(),
        ThreadTicker,
    )
}

fn history(scheduler: &OsScheduler, idx: usize) -> Vec<HealthSymbol> {
    let id = scheduler.registry().ids().nth(idx).unwrap();
    scheduler.ledger().recent_window(id, usize::MAX)
}

/*************************************************************
                      End-to-end scenarios
**************************************************************/

#[test]
fn success_and_failure_over_three_ticks() {
    let _children = exclusive_children();
    let mut scheduler = scheduler(
        vec![Target::ping("ok"), Target::ping("down")],
        shell_probes(SCRIPT, FAILURE_CODE),
        Duration::from_millis(250),
    );

    scheduler.run_ticks(3).unwrap();

    assert_eq!(history(&scheduler, 0), vec![Success, Success, Success]);
    assert_eq!(history(&scheduler, 1), vec![Failure, Failure, Failure]);
    assert_eq!(scheduler.renderer().frames, 3);
}

#[test]
fn unconfigured_exit_code_is_unknown() {
    let _children = exclusive_children();
    let mut scheduler = scheduler(
        vec![Target::ping("odd")],
        shell_probes(SCRIPT, FAILURE_CODE),
        Duration::from_millis(250),
    );

    scheduler.tick().unwrap();

    assert_eq!(history(&scheduler, 0), vec![Unknown]);
}

#[test]
fn slow_probe_is_pending_then_credited() {
    let _children = exclusive_children();
    let mut scheduler = scheduler(
        vec![Target::ping("slow")],
        shell_probes(SCRIPT, FAILURE_CODE),
        Duration::from_millis(400),
    );

    scheduler.run_ticks(2).unwrap();

    assert_eq!(history(&scheduler, 0), vec![Pending, Success]);
}

#[test]
fn name_resolution_probe_sees_lookup_name_then_server() {
    let _children = exclusive_children();
    let script = r#"[ "$0" = lookup.test ] && [ "$1" = 10.0.0.53 ] && exit 0; exit 1"#;
    let mut scheduler = scheduler(
        vec![Target::dns("10.0.0.53")],
        shell_probes(script, FAILURE_CODE),
        Duration::from_millis(250),
    );

    scheduler.tick().unwrap();

    assert_eq!(history(&scheduler, 0), vec![Success]);
}

#[cfg(target_os = "linux")]
#[test]
fn child_stdio_is_detached_from_the_terminal() {
    let _children = exclusive_children();
    let script = r#"
for fd in 0 1 2; do
    [ "$(readlink /proc/$$/fd/$fd)" = /dev/null ] || exit 1
done
exit 0
"#;
    let mut scheduler = scheduler(
        vec![Target::ping("quiet")],
        shell_probes(script, FAILURE_CODE),
        Duration::from_millis(250),
    );

    scheduler.tick().unwrap();

    assert_eq!(history(&scheduler, 0), vec![Success]);
}

/*************************************************************
                        Fatal conditions
**************************************************************/

#[test]
fn missing_probe_binary_is_fatal() {
    let _children = exclusive_children();
    let mut probes = shell_probes(SCRIPT, FAILURE_CODE);
    probes.reachability.program = "/nonexistent/netdiag-probe".into();
    let mut scheduler = scheduler(vec![Target::ping("ok")], probes, Duration::from_millis(50));

    let err = scheduler.tick().unwrap_err();

    assert!(matches!(err, SupervisorError::Launch { .. }));
    assert!(err.to_string().contains("/nonexistent/netdiag-probe"));
}

#[test]
fn killed_probe_is_fatal() {
    let _children = exclusive_children();
    let mut scheduler = scheduler(
        vec![Target::ping("killed")],
        shell_probes(SCRIPT, FAILURE_CODE),
        Duration::from_millis(250),
    );

    let err = scheduler.tick().unwrap_err();

    assert!(matches!(err, SupervisorError::AbnormalTermination { .. }));
}

/*************************************************************
                         Process control
**************************************************************/

#[test]
fn poll_without_children_reports_none() {
    let _children = exclusive_children();
    let mut processes = OsProcesses;

    // Drain anything an earlier test left behind.
    let mut outcome = processes.poll_any().unwrap();
    for _ in 0..40 {
        if outcome == Poll::NoChildren {
            break;
        }
        thread::sleep(Duration::from_millis(50));
        outcome = processes.poll_any().unwrap();
    }

    assert_eq!(outcome, Poll::NoChildren);
}
