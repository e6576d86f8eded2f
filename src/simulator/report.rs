//! Simulation report generation.

use super::config::{PlayerPolicy, SimConfig};
use super::runner::RunStats;
use crate::battle::ActionId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub battles_per_run: u32,
    pub policy: PlayerPolicy,
    pub seed: Option<u64>,

    // Outcomes
    pub victories: u64,
    pub defeats: u64,
    pub stalemates: u64,
    pub win_rate: f64,
    pub avg_rounds_per_battle: f64,

    // Streaks
    pub best_streak: u32,
    pub avg_best_streak: f64,
    pub highest_opponent_level: u32,

    // Damage flow per round
    pub avg_damage_dealt_per_round: f64,
    pub avg_damage_taken_per_round: f64,
    pub avg_healing_per_round: f64,

    // Share of rounds each action was used in
    pub player_action_share: BTreeMap<ActionId, f64>,
    pub opponent_action_share: BTreeMap<ActionId, f64>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn action_share(
    runs: &[RunStats],
    counts: impl Fn(&RunStats) -> &BTreeMap<ActionId, u64>,
) -> BTreeMap<ActionId, f64> {
    let mut totals: BTreeMap<ActionId, u64> = BTreeMap::new();
    for run in runs {
        for (action, count) in counts(run) {
            *totals.entry(*action).or_insert(0) += count;
        }
    }
    let all: u64 = totals.values().sum();

    ActionId::ALL
        .into_iter()
        .map(|action| (action, ratio(totals.get(&action).copied().unwrap_or(0), all)))
        .collect()
}

impl SimReport {
    /// Create a report from a collection of run statistics.
    pub fn from_runs(config: &SimConfig, runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;

        let victories: u64 = runs.iter().map(|r| r.victories as u64).sum();
        let defeats: u64 = runs.iter().map(|r| r.defeats as u64).sum();
        let stalemates: u64 = runs.iter().map(|r| r.stalemates as u64).sum();
        let finished = victories + defeats;
        let total_rounds: u64 = runs.iter().map(|r| r.total_rounds).sum();
        let recorded_rounds: u64 = runs
            .iter()
            .map(|r| r.player_actions.values().sum::<u64>())
            .sum();

        let best_streak = runs.iter().map(|r| r.best_streak).max().unwrap_or(0);
        let avg_best_streak = ratio(
            runs.iter().map(|r| r.best_streak as u64).sum(),
            num_runs as u64,
        );
        let highest_opponent_level = runs
            .iter()
            .map(|r| r.highest_opponent_level)
            .max()
            .unwrap_or(0);

        let damage_dealt: u64 = runs.iter().map(|r| r.damage_dealt).sum();
        let damage_taken: u64 = runs.iter().map(|r| r.damage_taken).sum();
        let healing: u64 = runs.iter().map(|r| r.healing_done).sum();

        Self {
            num_runs,
            battles_per_run: config.battles_per_run,
            policy: config.policy,
            seed: config.seed,
            victories,
            defeats,
            stalemates,
            win_rate: ratio(victories, finished),
            avg_rounds_per_battle: ratio(total_rounds, finished),
            best_streak,
            avg_best_streak,
            highest_opponent_level,
            avg_damage_dealt_per_round: ratio(damage_dealt, recorded_rounds),
            avg_damage_taken_per_round: ratio(damage_taken, recorded_rounds),
            avg_healing_per_round: ratio(healing, recorded_rounds),
            player_action_share: action_share(&runs, |r| &r.player_actions),
            opponent_action_share: action_share(&runs, |r| &r.opponent_actions),
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    DUEL SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} x {} battles, player policy: {}\n\n",
            self.num_runs,
            self.battles_per_run,
            self.policy.name()
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Victories:           {}\n", self.victories));
        report.push_str(&format!("  Defeats:             {}\n", self.defeats));
        report.push_str(&format!("  Stalemates:          {}\n", self.stalemates));
        report.push_str(&format!(
            "  Win Rate:            {:.1}%\n",
            self.win_rate * 100.0
        ));
        report.push_str(&format!(
            "  Avg Rounds/Battle:   {:.1}\n\n",
            self.avg_rounds_per_battle
        ));

        report.push_str("── STREAKS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Best Streak:         {}\n", self.best_streak));
        report.push_str(&format!(
            "  Avg Best Streak:     {:.2}\n",
            self.avg_best_streak
        ));
        report.push_str(&format!(
            "  Top Opponent Level:  {}\n\n",
            self.highest_opponent_level
        ));

        report.push_str("── PER ROUND ────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Damage Dealt:        {:.1}\n",
            self.avg_damage_dealt_per_round
        ));
        report.push_str(&format!(
            "  Damage Taken:        {:.1}\n",
            self.avg_damage_taken_per_round
        ));
        report.push_str(&format!(
            "  Healing:             {:.1}\n\n",
            self.avg_healing_per_round
        ));

        report.push_str("── ACTION USAGE ─────────────────────────────────────────────────\n");
        report.push_str("  Action          Player   Opponent\n");
        report.push_str("  ──────          ──────   ────────\n");
        for action in ActionId::ALL {
            let player = self.player_action_share.get(&action).copied().unwrap_or(0.0);
            let opponent = self
                .opponent_action_share
                .get(&action)
                .copied()
                .unwrap_or(0.0);
            report.push_str(&format!(
                "  {:<14} {:>6.1}%   {:>6.1}%\n",
                action.name(),
                player * 100.0,
                opponent * 100.0
            ));
        }

        if self.stalemates > 0 {
            report.push_str(&format!(
                "\n  ⚠️  {} battles hit the round cap - heals outpacing damage?\n",
                self.stalemates
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
