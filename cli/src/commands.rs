pub mod targets;
pub mod watch;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use netdiag_common::config::Config;
use netdiag_common::target::Target;

#[derive(Parser)]
#[command(name = "netdiag")]
#[command(about = "Watch reachability and name resolution, one column per second.")]
pub struct CommandLine {
    /// TOML config file; built-in defaults apply when omitted
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Disable colors
    #[arg(long, global = true)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the live dashboard (default)
    #[command(alias = "w")]
    Watch(WatchArgs),
    /// List targets and the probe each one runs
    #[command(alias = "t")]
    Targets(TargetArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Watch(WatchArgs::default())
    }
}

#[derive(Args, Default)]
pub struct TargetArgs {
    /// Target as KIND:ADDRESS, e.g. ping:8.8.8.8 or dns:8.8.4.4; replaces configured targets
    #[arg(short, long = "target", value_name = "KIND:ADDRESS")]
    pub targets: Vec<Target>,
}

impl TargetArgs {
    pub fn apply(&self, config: &mut Config) {
        if !self.targets.is_empty() {
            config.targets = self.targets.clone();
        }
    }
}

#[derive(Args, Default)]
pub struct WatchArgs {
    #[command(flatten)]
    pub selection: TargetArgs,
    /// Tick interval in milliseconds
    #[arg(short, long, value_name = "MS")]
    pub interval: Option<u64>,
    /// Dashboard width in columns
    #[arg(short, long, value_name = "COLS")]
    pub width: Option<usize>,
    /// Stop after this many ticks instead of running forever
    #[arg(long, value_name = "N")]
    pub ticks: Option<u64>,
}

impl WatchArgs {
    pub fn apply(&self, config: &mut Config) {
        self.selection.apply(config);
        if let Some(interval) = self.interval {
            config.interval_ms = interval;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default()),
    }
}
