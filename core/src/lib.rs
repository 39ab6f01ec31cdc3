//! Scheduling and process supervision for the netdiag dashboard.
//!
//! * [`registry`] holds the fixed set of targets.
//! * [`launcher`] turns a target into a probe command and starts it.
//! * [`classifier`] maps a probe's exit code to a [`HealthSymbol`](netdiag_common::health::HealthSymbol).
//! * [`ledger`] keeps the rolling history per target.
//! * [`scheduler`] drives all of the above, one tick at a time.
//!
//! The OS and the terminal are reached only through the traits in
//! [`process`] and [`render`].

pub mod classifier;
pub mod error;
pub mod launcher;
pub mod ledger;
pub mod process;
pub mod registry;
pub mod render;
pub mod scheduler;

pub use error::SupervisorError;
