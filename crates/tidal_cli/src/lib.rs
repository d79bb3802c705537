//! Tidal CLI library
//!
//! Configuration loading and the headless frame loop behind the `tidal`
//! binary.

pub mod config;
pub mod host;

pub use config::TidalConfig;
pub use host::{run, RunOptions, RunSummary};
