//! Static action catalog: three elemental attacks plus heal, strong attack
//! and defense.

use crate::error::BattleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a battle action. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    Rock,
    Scissors,
    Paper,
    Heal,
    StrongAttack,
    Defense,
}

/// Category of an action; drives how the resolver evaluates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    ElementalAttack,
    Heal,
    SpecialAttack,
    Defense,
}

/// Catalog entry for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub id: ActionId,
    pub name: &'static str,
    pub kind: ActionKind,
    /// Elemental attack this one beats; `None` outside the elemental cycle.
    pub beats: Option<ActionId>,
    /// Damage range for attacks, heal range for heal, `(0, 0)` for defense.
    pub range: (u32, u32),
    /// Rounds before the action can be chosen again. 0 = always available.
    pub cooldown: u32,
}

/// Indexed by `ActionId as usize`.
const CATALOG: [Action; 6] = [
    Action {
        id: ActionId::Rock,
        name: "Rock",
        kind: ActionKind::ElementalAttack,
        beats: Some(ActionId::Scissors),
        range: (20, 30),
        cooldown: 0,
    },
    Action {
        id: ActionId::Scissors,
        name: "Scissors",
        kind: ActionKind::ElementalAttack,
        beats: Some(ActionId::Paper),
        range: (15, 25),
        cooldown: 0,
    },
    Action {
        id: ActionId::Paper,
        name: "Paper",
        kind: ActionKind::ElementalAttack,
        beats: Some(ActionId::Rock),
        range: (18, 28),
        cooldown: 0,
    },
    Action {
        id: ActionId::Heal,
        name: "Heal",
        kind: ActionKind::Heal,
        beats: None,
        range: (20, 35),
        cooldown: 2,
    },
    Action {
        id: ActionId::StrongAttack,
        name: "Strong Attack",
        kind: ActionKind::SpecialAttack,
        beats: None,
        range: (30, 40),
        cooldown: 3,
    },
    Action {
        id: ActionId::Defense,
        name: "Defense",
        kind: ActionKind::Defense,
        beats: None,
        range: (0, 0),
        cooldown: 2,
    },
];

impl ActionId {
    pub const ALL: [ActionId; 6] = [
        ActionId::Rock,
        ActionId::Scissors,
        ActionId::Paper,
        ActionId::Heal,
        ActionId::StrongAttack,
        ActionId::Defense,
    ];

    pub const ELEMENTAL: [ActionId; 3] = [ActionId::Rock, ActionId::Scissors, ActionId::Paper];

    pub fn action(self) -> &'static Action {
        &CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.action().name
    }

    pub fn kind(self) -> ActionKind {
        self.action().kind
    }

    pub fn beats(self) -> Option<ActionId> {
        self.action().beats
    }

    pub fn range(self) -> (u32, u32) {
        self.action().range
    }

    pub fn cooldown(self) -> u32 {
        self.action().cooldown
    }

    pub fn is_elemental(self) -> bool {
        self.kind() == ActionKind::ElementalAttack
    }

    /// Stable text identifier, also accepted by `FromStr`.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Scissors => "scissors",
            Self::Paper => "paper",
            Self::Heal => "heal",
            Self::StrongAttack => "strong_attack",
            Self::Defense => "defense",
        }
    }

    /// Number key bound to the action in the front-end (1-6).
    pub fn hotkey(self) -> char {
        match self {
            Self::Rock => '1',
            Self::Scissors => '2',
            Self::Paper => '3',
            Self::Heal => '4',
            Self::StrongAttack => '5',
            Self::Defense => '6',
        }
    }

    pub fn from_hotkey(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.hotkey() == key)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionId {
    type Err = BattleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        let mut chars = needle.chars();
        if let (Some(key), None) = (chars.next(), chars.next()) {
            if let Some(found) = Self::from_hotkey(key) {
                return Ok(found);
            }
        }
        Self::ALL
            .into_iter()
            .find(|action| action.slug() == needle)
            .ok_or_else(|| BattleError::UnknownAction(s.to_string()))
    }
}
