//! Turn-based elemental battle: action catalog, combatants, round resolver,
//! opponent selection and the session state machine.

pub mod actions;
pub mod dice;
pub mod logic;
pub mod opponent;
pub mod session;
pub mod types;

pub use actions::{Action, ActionId, ActionKind};
pub use dice::Dice;
pub use logic::{exchange_winner, resolve_round, type_bonus, Exchange};
pub use opponent::{choose_opponent_action, opponent_weight, pick_weighted_ready};
pub use session::{opponent_max_health, spawn_opponent, spawn_player, BattleSession};
pub use types::*;
