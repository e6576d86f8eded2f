//! Battle balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of battles through the real `BattleSession` with a
//! scripted player policy to analyze:
//! - Win rate and how long streaks last
//! - Round count per battle
//! - How often each action gets used by either side

mod config;
mod report;
mod runner;

pub use config::{PlayerPolicy, SimConfig};
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_run, RunStats};
