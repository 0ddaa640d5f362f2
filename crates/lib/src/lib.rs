//! hostcheck-lib: Host environment checks
//!
//! This crate validates a host by running four independent checks:
//! - `checks`: the `PlatformOps` capability set with Windows and POSIX variants
//! - `run`: the orchestrator that runs every check and aggregates the outcome
//! - `platform`: OS family detection and filesystem capability probes
//! - `config`: timeouts and exit-code policy shared by the checks

pub mod checks;
pub mod config;
pub mod platform;
pub mod run;

#[cfg(test)]
mod testutil;
