//! # Probe Target Model
//!
//! A target is one `(kind, address)` pair under continuous test.
//!
//! Targets come from the config file or from the command line, where they
//! are written as `KIND:ADDRESS`:
//! * `ping:8.8.8.8` - reachability probe against an IP or hostname.
//! * `dns:8.8.4.4` - name-resolution lookup using `8.8.4.4` as the server.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// What kind of probe is run against a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Reachability probe (ping).
    #[serde(alias = "ping")]
    Reachability,
    /// Name-resolution lookup against the target as DNS server.
    #[serde(alias = "dns")]
    NameResolution,
}

impl TargetKind {
    /// Short label shown in front of the address on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            TargetKind::Reachability => "Ping",
            TargetKind::NameResolution => "DNS",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ping" | "reachability" => Ok(TargetKind::Reachability),
            "dns" | "name_resolution" | "name-resolution" => Ok(TargetKind::NameResolution),
            other => Err(format!("unknown probe kind: {other}")),
        }
    }
}

/// Immutable identity of something under test.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Target {
    pub kind: TargetKind,
    /// IP for reachability probes, DNS server for name-resolution probes.
    #[serde(deserialize_with = "trimmed")]
    pub address: String,
}

/// Config-file addresses get the same trimming as `KIND:ADDRESS` arguments.
fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let address = String::deserialize(deserializer)?;
    Ok(address.trim().to_string())
}

impl Target {
    pub fn new(kind: TargetKind, address: impl Into<String>) -> Self {
        Self {
            kind,
            address: address.into(),
        }
    }

    pub fn ping(address: impl Into<String>) -> Self {
        Self::new(TargetKind::Reachability, address)
    }

    pub fn dns(address: impl Into<String>) -> Self {
        Self::new(TargetKind::NameResolution, address)
    }

    /// `"<Kind> <address>"`, the text in front of the colon on each row.
    pub fn label(&self) -> String {
        format!("{} {}", self.kind.label(), self.address)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.address)
    }
}

impl FromStr for Target {
    type Err = String;

    /// Parses `KIND:ADDRESS`.
    ///
    /// The kind is case-insensitive. Everything after the first `:` is the
    /// address, so `ping:::1` targets the IPv6 loopback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((kind_str, address)) = s.split_once(':') else {
            return Err(format!("invalid target '{s}', expected KIND:ADDRESS"));
        };

        let kind = kind_str.parse::<TargetKind>()?;
        let address = address.trim();
        if address.is_empty() {
            return Err(format!("target '{s}' has an empty address"));
        }

        Ok(Target::new(kind, address))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
