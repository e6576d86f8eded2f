//! Opponent action selection: weighted random over actions off cooldown.

use super::actions::ActionId;
use super::dice::Dice;
use super::types::Cooldowns;
use crate::constants::*;

/// Base weight of each action for the opponent.
pub fn opponent_weight(action: ActionId) -> f64 {
    match action {
        ActionId::Rock | ActionId::Scissors | ActionId::Paper => OPPONENT_ELEMENTAL_WEIGHT,
        ActionId::Heal => OPPONENT_HEAL_WEIGHT,
        ActionId::Defense => OPPONENT_DEFENSE_WEIGHT,
        ActionId::StrongAttack => OPPONENT_SPECIAL_WEIGHT,
    }
}

/// Picks among the actions that are ready, weighted by `weight`.
/// Falls back to a uniform elemental attack when nothing is available.
pub fn pick_weighted_ready<D: Dice>(
    cooldowns: &Cooldowns,
    weight: impl Fn(ActionId) -> f64,
    dice: &mut D,
) -> ActionId {
    let candidates: Vec<ActionId> = ActionId::ALL
        .into_iter()
        .filter(|action| cooldowns.is_ready(*action))
        .collect();
    let weights: Vec<f64> = candidates.iter().map(|action| weight(*action)).collect();

    match dice.pick_weighted(&weights) {
        Some(index) => candidates[index],
        None => ActionId::ELEMENTAL[dice.pick(ActionId::ELEMENTAL.len())],
    }
}

/// Chooses the opponent's action and arms its cooldown.
pub fn choose_opponent_action<D: Dice>(cooldowns: &mut Cooldowns, dice: &mut D) -> ActionId {
    let action = pick_weighted_ready(cooldowns, opponent_weight, dice);
    cooldowns.arm(action);
    action
}
