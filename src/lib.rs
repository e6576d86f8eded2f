//! Elemental Duel - turn-based elemental rock-paper-scissors battles.
//!
//! This crate exposes the battle engine, configuration and the balance
//! simulator; the terminal front-end lives in the `duel` binary.

pub mod battle;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod simulator;

pub use battle::{ActionId, BattlePhase, BattleResult, BattleSession, Dice, Submission};
pub use config::{BattleConfig, GameConfig};
pub use error::{BattleError, ConfigError};
