//! Battle data structures: combatants, elemental types, cooldowns and
//! round outcomes.

use super::actions::ActionId;
use crate::constants::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Elemental type of a combatant. Each type is weak to one elemental attack
/// and strong with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementalType {
    Balanced,
    Rogue,
    Scholar,
    Brawler,
}

impl ElementalType {
    pub const ALL: [ElementalType; 4] = [
        ElementalType::Balanced,
        ElementalType::Rogue,
        ElementalType::Scholar,
        ElementalType::Brawler,
    ];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or(Self::Balanced)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Balanced => "Balanced",
            Self::Rogue => "Rogue",
            Self::Scholar => "Scholar",
            Self::Brawler => "Brawler",
        }
    }

    /// Attack that deals bonus damage against this type.
    pub fn weakness(&self) -> ActionId {
        match self {
            Self::Balanced => ActionId::Rock,
            Self::Rogue => ActionId::Scissors,
            Self::Scholar => ActionId::Paper,
            Self::Brawler => ActionId::Scissors,
        }
    }

    /// Attack this type deals bonus damage with.
    pub fn strength(&self) -> ActionId {
        match self {
            Self::Balanced => ActionId::Paper,
            Self::Rogue => ActionId::Rock,
            Self::Scholar => ActionId::Scissors,
            Self::Brawler => ActionId::Rock,
        }
    }
}

impl fmt::Display for ElementalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Opponent,
}

/// One of the two fighters.
///
/// Health is kept private so `0 <= health <= max_health` holds after every
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combatant {
    pub name: String,
    pub side: Side,
    pub element: ElementalType,
    /// Set by the resolver for the round in which defense was chosen.
    pub defending: bool,
    level: u32,
    health: u32,
    max_health: u32,
    base_level: u32,
    base_max_health: u32,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        side: Side,
        level: u32,
        max_health: u32,
        element: ElementalType,
    ) -> Self {
        let level = level.max(1);
        let max_health = max_health.max(1);
        Self {
            name: name.into(),
            side,
            element,
            defending: false,
            level,
            health: max_health,
            max_health,
            base_level: level,
            base_max_health: max_health,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn weakness(&self) -> ActionId {
        self.element.weakness()
    }

    pub fn strength(&self) -> ActionId {
        self.element.strength()
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn health_ratio(&self) -> f64 {
        self.health as f64 / self.max_health as f64
    }

    /// Subtracts `amount`, floored at 0. Returns true when defeated.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.is_defeated()
    }

    /// Restores up to `amount` health, capped at max. Returns the new health.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health
    }

    /// Gains a level, recomputes max health from the base values and refills
    /// health. Returns the new level.
    pub fn level_up(&mut self) -> u32 {
        self.level += 1;
        let gained = self.level - self.base_level;
        self.max_health =
            self.base_max_health * (LEVEL_UP_HP_DIVISOR + gained) / LEVEL_UP_HP_DIVISOR;
        self.health = self.max_health;
        self.level
    }
}

/// Remaining rounds before each used action is available again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cooldowns {
    remaining: BTreeMap<ActionId, u32>,
}

impl Cooldowns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the action's cooldown. Actions without one leave no entry.
    pub fn arm(&mut self, action: ActionId) {
        let rounds = action.cooldown();
        if rounds > 0 {
            self.remaining.insert(action, rounds);
        }
    }

    pub fn remaining(&self, action: ActionId) -> u32 {
        self.remaining.get(&action).copied().unwrap_or(0)
    }

    pub fn is_ready(&self, action: ActionId) -> bool {
        self.remaining(action) == 0
    }

    /// One resolved round passed.
    pub fn tick(&mut self) {
        for rounds in self.remaining.values_mut() {
            *rounds = rounds.saturating_sub(1);
        }
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
    }

    /// Entries still counting down, in catalog order.
    pub fn active(&self) -> impl Iterator<Item = (ActionId, u32)> + '_ {
        self.remaining
            .iter()
            .filter(|(_, rounds)| **rounds > 0)
            .map(|(action, rounds)| (*action, *rounds))
    }
}

/// How a round played out, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RoundSummary {
    PlayerWinsExchange { winner: ActionId, loser: ActionId },
    OpponentWinsExchange { winner: ActionId, loser: ActionId },
    DrawExchange,
    PlayerHealed { amount: u32 },
    OpponentHealed { amount: u32 },
    SpecialExchange,
    PlayerDefends,
    OpponentDefends,
}

impl RoundSummary {
    pub fn favors_player(&self) -> bool {
        matches!(self, Self::PlayerWinsExchange { .. } | Self::PlayerHealed { .. })
    }

    pub fn favors_opponent(&self) -> bool {
        matches!(
            self,
            Self::OpponentWinsExchange { .. } | Self::OpponentHealed { .. }
        )
    }
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerWinsExchange { winner, loser }
            | Self::OpponentWinsExchange { winner, loser } => {
                write!(f, "{} beats {}!", winner, loser)
            }
            Self::DrawExchange => f.write_str("Draw! Both take damage!"),
            Self::PlayerHealed { amount } => write!(f, "You restored {} HP!", amount),
            Self::OpponentHealed { amount } => write!(f, "The rival restored {} HP!", amount),
            Self::SpecialExchange => f.write_str("Special actions!"),
            Self::PlayerDefends => f.write_str("You defend! Incoming damage halved"),
            Self::OpponentDefends => f.write_str("The rival defends! Incoming damage halved"),
        }
    }
}

/// Computed result of one round, not yet applied to health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    pub player_action: ActionId,
    pub opponent_action: ActionId,
    /// Damage the player deals to the opponent.
    pub damage_to_opponent: u32,
    /// Damage the opponent deals to the player.
    pub damage_to_player: u32,
    /// Heal rolled for the player (already applied during resolution).
    pub player_heal: u32,
    /// Heal rolled for the opponent (already applied during resolution).
    pub opponent_heal: u32,
    /// Type bonus percentage on the player's attack.
    pub player_type_bonus: u32,
    /// Type bonus percentage on the opponent's attack.
    pub opponent_type_bonus: u32,
    pub summary: RoundSummary,
}

impl RoundOutcome {
    pub fn description(&self) -> String {
        self.summary.to_string()
    }
}

/// Phase of the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    AwaitingPlayer,
    AwaitingOpponent,
    RoundResolved,
    BattleOver,
}

/// How a finished battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleResult {
    Victory,
    Defeat,
}

/// Answer to a player action submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Accepted,
    /// The session is not waiting for a player choice.
    NotYourTurn,
    /// The action is still cooling down.
    OnCooldown { remaining: u32 },
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Timed message shown over the battle screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub text: String,
    pub remaining_ms: u64,
}
