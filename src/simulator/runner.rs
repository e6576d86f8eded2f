//! Simulation runner driving `BattleSession` with a scripted player.
//!
//! Waits are skipped instead of ticked, so a battle runs as fast as the
//! resolver allows. Statistics are collected from each round outcome.

use super::config::SimConfig;
use super::report::SimReport;
use crate::battle::{
    pick_weighted_ready, ActionId, BattlePhase, BattleResult, BattleSession, RoundOutcome,
};
use crate::config::BattleConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

/// Statistics of one run (a string of consecutive battles).
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    pub victories: u32,
    pub defeats: u32,
    /// Battles abandoned after `max_rounds_per_battle`.
    pub stalemates: u32,
    /// Rounds across finished battles.
    pub total_rounds: u64,
    pub best_streak: u32,
    pub highest_opponent_level: u32,
    pub damage_dealt: u64,
    pub damage_taken: u64,
    pub healing_done: u64,
    pub player_actions: BTreeMap<ActionId, u64>,
    pub opponent_actions: BTreeMap<ActionId, u64>,
}

impl RunStats {
    pub fn battles_finished(&self) -> u32 {
        self.victories + self.defeats
    }

    fn record_round(&mut self, outcome: &RoundOutcome) {
        *self.player_actions.entry(outcome.player_action).or_insert(0) += 1;
        *self.opponent_actions.entry(outcome.opponent_action).or_insert(0) += 1;
        self.damage_dealt += outcome.damage_to_opponent as u64;
        self.damage_taken += outcome.damage_to_player as u64;
        self.healing_done += outcome.player_heal as u64;
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };

        let stats = simulate_single_run(config, &mut rng);

        if config.verbosity >= 2 {
            tracing::info!(
                "Run {}/{} - Wins {}, Losses {}, Stalemates {}, Best streak {}, Top level {}",
                run_idx + 1,
                config.num_runs,
                stats.victories,
                stats.defeats,
                stats.stalemates,
                stats.best_streak,
                stats.highest_opponent_level
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(config, all_runs)
}

/// Plays `battles_per_run` battles back to back in one session.
pub fn simulate_single_run<R: Rng>(config: &SimConfig, rng: &mut R) -> RunStats {
    let mut stats = RunStats::default();
    let mut session = BattleSession::new(BattleConfig::default(), rng);

    for _ in 0..config.battles_per_run {
        stats.highest_opponent_level = stats
            .highest_opponent_level
            .max(session.opponent().level());

        match fight_battle(config, &mut session, &mut stats, rng) {
            Some(BattleResult::Victory) => {
                stats.victories += 1;
                stats.best_streak = stats.best_streak.max(session.wins());
            }
            Some(BattleResult::Defeat) => stats.defeats += 1,
            None => {
                stats.stalemates += 1;
                tracing::debug!("battle abandoned after {} rounds", config.max_rounds_per_battle);
                session = BattleSession::new(BattleConfig::default(), rng);
                continue;
            }
        }

        session.start_new_battle(rng);
    }

    stats
}

/// Plays rounds until the battle is over. `None` if it hit the round cap.
fn fight_battle<R: Rng>(
    config: &SimConfig,
    session: &mut BattleSession,
    stats: &mut RunStats,
    rng: &mut R,
) -> Option<BattleResult> {
    let mut rounds = 0u32;

    while session.phase() != BattlePhase::BattleOver {
        if rounds >= config.max_rounds_per_battle {
            return None;
        }

        let action = pick_weighted_ready(
            session.player_cooldowns(),
            |candidate| config.policy.weight(candidate),
            rng,
        );
        if !session.submit_player_action(action).is_accepted() {
            return None;
        }
        session.skip_wait(rng);
        if let Some(outcome) = session.last_outcome() {
            stats.record_round(outcome);
        }
        session.continue_round();
        rounds += 1;
    }

    stats.total_rounds += rounds as u64;
    session.result()
}
