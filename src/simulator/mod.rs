//! Balance simulator for Monte Carlo analysis.
//!
//! Runs scripted players through many battles to analyze:
//! - Win rate per tier at a given answer accuracy
//! - Level and gold progression over a session
//! - How upgrade choices change the outcome
//!
//! Battles go through the same `Battle` state machine the game uses, so
//! results match real gameplay rules.

mod config;
mod report;
mod runner;

pub use config::{SimConfig, UpgradePolicy};
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_run, RunStats};
