mod commands;
mod terminal;

use commands::{CommandLine, Commands, targets, watch};
use terminal::logging;
use tracing::error;

fn main() {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);
    if commands.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = run(commands) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run(commands: CommandLine) -> anyhow::Result<()> {
    let config = commands::load_config(commands.config.as_deref())?;

    match commands.command.unwrap_or_default() {
        Commands::Watch(args) => watch::watch(config, args),
        Commands::Targets(args) => targets::targets(config, args),
    }
}
