//! Simulation configuration.

use crate::battle::{opponent_weight, ActionId};
use serde::Serialize;

/// How the simulated player picks its actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerPolicy {
    /// Uniform over every ready action.
    Random,
    /// Same weights the opponent uses.
    Weighted,
}

impl PlayerPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "random" => Some(Self::Random),
            "weighted" => Some(Self::Weighted),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Weighted => "weighted",
        }
    }

    /// Selection weight of `action` under this policy.
    pub fn weight(&self, action: ActionId) -> f64 {
        match self {
            Self::Random => 1.0,
            Self::Weighted => opponent_weight(action),
        }
    }
}

/// Configuration for a simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent runs (each starts from a fresh session)
    pub num_runs: u32,

    /// Battles fought back to back within one run
    pub battles_per_run: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Rounds after which a battle is abandoned as a stalemate
    pub max_rounds_per_battle: u32,

    pub policy: PlayerPolicy,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 500,
            battles_per_run: 20,
            seed: None,
            max_rounds_per_battle: 200,
            policy: PlayerPolicy::Random,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small, fast run for sanity checks.
    pub fn quick() -> Self {
        Self {
            num_runs: 50,
            battles_per_run: 10,
            ..Default::default()
        }
    }

    /// Long streak analysis: many battles per run.
    pub fn endurance() -> Self {
        Self {
            num_runs: 200,
            battles_per_run: 100,
            ..Default::default()
        }
    }
}
