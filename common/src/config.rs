//! Runtime configuration.
//!
//! Everything has a default that reproduces the stock deployment, so the
//! config file (TOML) only needs to name what it changes:
//!
//! ```toml
//! interval_ms = 1000
//! width = 75
//!
//! [probes.reachability]
//! program = "/bin/ping"
//! args = ["-n", "-c", "1", "-q", "-W", "5"]
//! failure_code = 1
//!
//! [[targets]]
//! kind = "ping"
//! address = "8.8.8.8"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::target::{Target, TargetKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("tick interval must be greater than zero")]
    ZeroInterval,
    #[error("no targets configured")]
    NoTargets,
    #[error("{kind} probe has an empty program path")]
    EmptyProgram { kind: TargetKind },
    #[error("target #{index} has an empty address")]
    EmptyAddress { index: usize },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tick period in milliseconds. Each tick adds one column of history.
    pub interval_ms: u64,
    /// Dashboard width in terminal columns, labels included.
    pub width: usize,
    /// Symbols kept per target beyond the visible window.
    pub history_slack: usize,
    pub probes: ProbeTable,
    pub targets: Vec<Target>,
}

/// Command shapes for both probe kinds.
///
/// A table given in the config file replaces the built-in one for that
/// kind entirely; fields are not merged.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeTable {
    pub reachability: ProbeSpec,
    pub name_resolution: ProbeSpec,
    /// Hostname every name-resolution probe asks its server about.
    pub lookup_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeSpec {
    pub program: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
    /// Exit code meaning "the network check ran and failed", as opposed to
    /// the tool crashing or being misused.
    pub failure_code: i32,
}

impl ProbeSpec {
    pub fn new(program: impl Into<PathBuf>, args: &[&str], failure_code: i32) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            failure_code,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            width: 75,
            history_slack: 16,
            probes: ProbeTable::default(),
            targets: default_targets(),
        }
    }
}

impl Default for ProbeTable {
    fn default() -> Self {
        Self {
            reachability: default_reachability(),
            name_resolution: ProbeSpec::new("/usr/bin/host", &["-t", "a"], 1),
            lookup_name: String::from("plunk.org"),
        }
    }
}

impl ProbeTable {
    pub fn get(&self, kind: TargetKind) -> &ProbeSpec {
        match kind {
            TargetKind::Reachability => &self.reachability,
            TargetKind::NameResolution => &self.name_resolution,
        }
    }
}

#[cfg(target_os = "macos")]
fn default_reachability() -> ProbeSpec {
    ProbeSpec::new("/sbin/ping", &["-n", "-c", "1", "-q", "-t", "5"], 2)
}

#[cfg(not(target_os = "macos"))]
fn default_reachability() -> ProbeSpec {
    ProbeSpec::new("/bin/ping", &["-n", "-c", "1", "-q", "-W", "5"], 1)
}

fn default_targets() -> Vec<Target> {
    vec![
        // LAN routers
        Target::ping("192.168.1.1"),
        Target::ping("192.168.1.2"),
        // Comcast resolvers
        Target::ping("75.75.75.75"),
        Target::ping("75.75.76.76"),
        // Google resolvers
        Target::ping("8.8.8.8"),
        Target::ping("8.8.4.4"),
        // plunk.org
        Target::ping("209.123.234.146"),
        Target::dns("75.75.75.75"),
        Target::dns("75.75.76.76"),
        Target::dns("8.8.8.8"),
        Target::dns("8.8.4.4"),
        Target::dns("192.168.1.1"),
    ]
}

impl Config {
    /// Reads, parses and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        for kind in [TargetKind::Reachability, TargetKind::NameResolution] {
            if self.probe(kind).program.as_os_str().is_empty() {
                return Err(ConfigError::EmptyProgram { kind });
            }
        }
        if let Some(index) = self
            .targets
            .iter()
            .position(|target| target.address.trim().is_empty())
        {
            return Err(ConfigError::EmptyAddress { index });
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn probe(&self, kind: TargetKind) -> &ProbeSpec {
        self.probes.get(kind)
    }
}
