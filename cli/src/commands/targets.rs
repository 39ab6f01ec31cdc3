use colored::*;
use netdiag_common::config::Config;
use netdiag_common::success;
use netdiag_core::launcher::ProbeLauncher;
use netdiag_core::registry::TargetRegistry;
use netdiag_core::render::Layout;

use crate::commands::TargetArgs;
use crate::terminal::{colors, print};

const KEY_WIDTH: usize = 8;

pub fn targets(mut config: Config, args: TargetArgs) -> anyhow::Result<()> {
    args.apply(&mut config);
    config.validate()?;

    let launcher = ProbeLauncher::new(config.probes.clone());
    let registry = TargetRegistry::new(config.targets.clone());

    print::header("probe settings");
    print::aligned_line("Interval", KEY_WIDTH, format!("{} ms", config.interval_ms));
    print::aligned_line("Width", KEY_WIDTH, config.width.to_string());
    print::aligned_line("Lookup", KEY_WIDTH, config.probes.lookup_name.as_str());
    print::aligned_line("Window", KEY_WIDTH, window_summary(&registry, config.width).bold());

    print::header("configured targets");
    for (id, target) in registry.iter() {
        print::tree_head(id.index(), &target.label());
        let command = launcher.command_for(target);
        let failure_code = launcher.failure_code(target.kind);
        print::as_tree_one_level(vec![
            ("Command".to_string(), command.to_string().normal()),
            ("Failure".to_string(), failure_code.to_string().color(colors::FAILURE)),
        ]);
    }
    print::fat_separator();

    success!("{} targets configured", registry.len());
    Ok(())
}

fn window_summary(registry: &TargetRegistry, width: usize) -> String {
    let layout = Layout::new(registry.label_width(), width);
    format!("{} ticks", layout.window)
}
