//! Round resolution: damage rolls, type bonuses, defense and the
//! rock-paper-scissors exchange.
//!
//! Modifiers apply in a fixed order: base roll, type bonus, defense
//! reduction, exchange multiplier.

use super::actions::{ActionId, ActionKind};
use super::dice::Dice;
use super::types::{Combatant, RoundOutcome, RoundSummary};
use crate::constants::*;

/// Attack the special attack pretends to be when computing its type bonus.
pub const SPECIAL_ATTACK_STAND_IN: ActionId = ActionId::ELEMENTAL[0];

/// Winner of an elemental exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    Draw,
    Player,
    Opponent,
}

/// What one side's action produced before the exchange multipliers.
#[derive(Debug, Clone, Copy, Default)]
struct SideEffect {
    damage: u32,
    heal: u32,
    type_bonus: u32,
}

/// Percentage points added to the attacker's damage.
/// +50 when `attack` is the defender's weakness, +25 more when it is the
/// attacker's strength.
pub fn type_bonus(attacker: &Combatant, attack: ActionId, defender: &Combatant) -> u32 {
    let mut bonus = 0;
    if attack == defender.weakness() {
        bonus += WEAKNESS_BONUS_PERCENT;
    }
    if attack == attacker.strength() {
        bonus += STRENGTH_BONUS_PERCENT;
    }
    bonus
}

/// `damage * (100 + bonus) / 100`, truncated.
pub fn apply_type_bonus(damage: u32, bonus_percent: u32) -> u32 {
    damage * (100 + bonus_percent) / 100
}

/// Compares two elemental attacks through the beats relation.
pub fn exchange_winner(player: ActionId, opponent: ActionId) -> Exchange {
    if player == opponent {
        Exchange::Draw
    } else if player.beats() == Some(opponent) {
        Exchange::Player
    } else {
        Exchange::Opponent
    }
}

fn winning_damage(damage: u32) -> u32 {
    damage * EXCHANGE_WIN_NUMERATOR / EXCHANGE_WIN_DENOMINATOR
}

fn losing_damage(damage: u32) -> u32 {
    damage / EXCHANGE_LOSS_DIVISOR
}

/// Evaluates one side's action. Heals land on `attacker` immediately.
fn evaluate_side<D: Dice>(
    action: ActionId,
    attacker: &mut Combatant,
    defender: &Combatant,
    dice: &mut D,
) -> SideEffect {
    let (min, max) = action.range();
    let mut effect = SideEffect::default();

    match action.kind() {
        ActionKind::ElementalAttack => {
            let base = dice.roll(min, max);
            effect.type_bonus = type_bonus(attacker, action, defender);
            effect.damage = apply_type_bonus(base, effect.type_bonus);
        }
        ActionKind::SpecialAttack => {
            let base = dice.roll(min, max);
            effect.type_bonus = type_bonus(attacker, SPECIAL_ATTACK_STAND_IN, defender);
            effect.damage = apply_type_bonus(base, effect.type_bonus);
        }
        ActionKind::Heal => {
            effect.heal = dice.roll(min, max);
            attacker.heal(effect.heal);
        }
        ActionKind::Defense => return effect,
    }

    if defender.defending {
        effect.damage /= DEFENSE_DAMAGE_DIVISOR;
    }
    effect
}

/// Resolves a round between the two chosen actions.
///
/// Defense flags are raised on both combatants before any damage is
/// computed; heals are applied to health right away. Damage is only
/// reported, the caller applies it.
pub fn resolve_round<D: Dice>(
    player_action: ActionId,
    opponent_action: ActionId,
    player: &mut Combatant,
    opponent: &mut Combatant,
    dice: &mut D,
) -> RoundOutcome {
    if player_action.kind() == ActionKind::Defense {
        player.defending = true;
    }
    if opponent_action.kind() == ActionKind::Defense {
        opponent.defending = true;
    }

    let mut mine = evaluate_side(player_action, player, opponent, dice);
    let mut theirs = evaluate_side(opponent_action, opponent, player, dice);

    let summary = if player_action.is_elemental() && opponent_action.is_elemental() {
        match exchange_winner(player_action, opponent_action) {
            Exchange::Player => {
                mine.damage = winning_damage(mine.damage);
                theirs.damage = losing_damage(theirs.damage);
                RoundSummary::PlayerWinsExchange {
                    winner: player_action,
                    loser: opponent_action,
                }
            }
            Exchange::Opponent => {
                mine.damage = losing_damage(mine.damage);
                theirs.damage = winning_damage(theirs.damage);
                RoundSummary::OpponentWinsExchange {
                    winner: opponent_action,
                    loser: player_action,
                }
            }
            Exchange::Draw => RoundSummary::DrawExchange,
        }
    } else if player.defending {
        RoundSummary::PlayerDefends
    } else if opponent.defending {
        RoundSummary::OpponentDefends
    } else if mine.heal > 0 {
        RoundSummary::PlayerHealed { amount: mine.heal }
    } else if theirs.heal > 0 {
        RoundSummary::OpponentHealed {
            amount: theirs.heal,
        }
    } else {
        RoundSummary::SpecialExchange
    };

    RoundOutcome {
        player_action,
        opponent_action,
        damage_to_opponent: mine.damage,
        damage_to_player: theirs.damage,
        player_heal: mine.heal,
        opponent_heal: theirs.heal,
        player_type_bonus: mine.type_bonus,
        opponent_type_bonus: theirs.type_bonus,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::dice::scripted::ScriptedDice;
    use crate::battle::types::{ElementalType, Side};

    fn player(element: ElementalType) -> Combatant {
        Combatant::new("Hero", Side::Player, 1, 100, element)
    }

    fn opponent(element: ElementalType) -> Combatant {
        Combatant::new("Rival", Side::Opponent, 1, 80, element)
    }

    #[test]
    fn test_type_bonus_both_conditions() {
        // Rogue is strong with Rock, Balanced is weak to Rock
        let attacker = player(ElementalType::Rogue);
        let defender = opponent(ElementalType::Balanced);
        let bonus = type_bonus(&attacker, ActionId::Rock, &defender);
        assert_eq!(bonus, 75);
        assert_eq!(apply_type_bonus(100, bonus), 175);
    }

    #[test]
    fn test_type_bonus_neither_condition() {
        let attacker = player(ElementalType::Scholar);
        let defender = opponent(ElementalType::Scholar);
        assert_eq!(type_bonus(&attacker, ActionId::Rock, &defender), 0);
        assert_eq!(apply_type_bonus(25, 0), 25);
    }

    #[test]
    fn test_type_bonus_single_conditions() {
        let attacker = player(ElementalType::Scholar);
        let weak = opponent(ElementalType::Scholar);
        assert_eq!(type_bonus(&attacker, ActionId::Paper, &weak), 50);
        assert_eq!(type_bonus(&attacker, ActionId::Scissors, &weak), 25);
    }

    #[test]
    fn test_exchange_winner() {
        assert_eq!(exchange_winner(ActionId::Rock, ActionId::Rock), Exchange::Draw);
        assert_eq!(exchange_winner(ActionId::Rock, ActionId::Scissors), Exchange::Player);
        assert_eq!(exchange_winner(ActionId::Scissors, ActionId::Paper), Exchange::Player);
        assert_eq!(exchange_winner(ActionId::Paper, ActionId::Rock), Exchange::Player);
        assert_eq!(exchange_winner(ActionId::Scissors, ActionId::Rock), Exchange::Opponent);
    }

    #[test]
    fn test_rock_beats_scissors_without_bonus() {
        // Scholar has no Rock relation on either side
        let mut p = player(ElementalType::Scholar);
        let mut o = opponent(ElementalType::Scholar);
        let mut dice = ScriptedDice::new().with_rolls(&[25, 20]);

        let outcome = resolve_round(ActionId::Rock, ActionId::Scissors, &mut p, &mut o, &mut dice);

        assert_eq!(outcome.player_type_bonus, 0);
        assert_eq!(outcome.damage_to_opponent, 37);
        // Scissors from a Scholar gains the strength bonus (20 * 1.25 = 25), then halves
        assert_eq!(outcome.opponent_type_bonus, 25);
        assert_eq!(outcome.damage_to_player, 12);
        assert_eq!(
            outcome.summary,
            RoundSummary::PlayerWinsExchange {
                winner: ActionId::Rock,
                loser: ActionId::Scissors
            }
        );
        // Resolution never touches health for damage
        assert_eq!(o.health(), 80);
        assert_eq!(p.health(), 100);
    }

    #[test]
    fn test_opponent_wins_exchange() {
        let mut p = player(ElementalType::Scholar);
        let mut o = opponent(ElementalType::Scholar);
        let mut dice = ScriptedDice::new().with_rolls(&[20, 20]);

        let outcome = resolve_round(ActionId::Rock, ActionId::Paper, &mut p, &mut o, &mut dice);

        // Paper vs Scholar: +50 weakness -> 30, x1.5 -> 45
        assert_eq!(outcome.damage_to_player, 45);
        assert_eq!(outcome.damage_to_opponent, 10);
        assert!(outcome.summary.favors_opponent());
    }

    #[test]
    fn test_draw_keeps_damage() {
        let mut p = player(ElementalType::Scholar);
        let mut o = opponent(ElementalType::Scholar);
        let mut dice = ScriptedDice::new().with_rolls(&[22, 27]);

        let outcome = resolve_round(ActionId::Rock, ActionId::Rock, &mut p, &mut o, &mut dice);

        assert_eq!(outcome.damage_to_opponent, 22);
        assert_eq!(outcome.damage_to_player, 27);
        assert_eq!(outcome.summary, RoundSummary::DrawExchange);
    }

    #[test]
    fn test_modifier_order_bonus_defense_exchange() {
        // Rogue attacker vs Balanced defender: Rock gets +75
        let mut p = player(ElementalType::Rogue);
        let mut o = opponent(ElementalType::Balanced);
        let mut dice = ScriptedDice::new().with_rolls(&[30]);

        let outcome = resolve_round(ActionId::Rock, ActionId::Defense, &mut p, &mut o, &mut dice);

        // 30 * 1.75 = 52 (52.5 truncated), defended -> 26, no exchange multiplier
        assert_eq!(outcome.damage_to_opponent, 26);
        assert_eq!(outcome.damage_to_player, 0);
        assert_eq!(outcome.summary, RoundSummary::OpponentDefends);
        assert!(o.defending);
    }

    #[test]
    fn test_player_defense_halves_incoming() {
        let mut p = player(ElementalType::Scholar);
        let mut o = opponent(ElementalType::Scholar);
        let mut dice = ScriptedDice::new().with_rolls(&[25]);

        let outcome = resolve_round(ActionId::Defense, ActionId::Rock, &mut p, &mut o, &mut dice);

        assert!(p.defending);
        assert_eq!(outcome.damage_to_player, 12);
        assert_eq!(outcome.damage_to_opponent, 0);
        assert_eq!(outcome.summary, RoundSummary::PlayerDefends);
    }

    #[test]
    fn test_special_attack_uses_rock_for_type_bonus() {
        // Defender weak to Rock, attacker strong with Rock
        let mut p = player(ElementalType::Rogue);
        let mut o = opponent(ElementalType::Balanced);
        let mut dice = ScriptedDice::new().with_rolls(&[40, 20]);

        let outcome =
            resolve_round(ActionId::StrongAttack, ActionId::Scissors, &mut p, &mut o, &mut dice);

        assert_eq!(outcome.player_type_bonus, 75);
        assert_eq!(outcome.damage_to_opponent, 70);
        // Rogue is weak to Scissors: 20 * 1.5, no exchange multiplier
        assert_eq!(outcome.opponent_type_bonus, 50);
        assert_eq!(outcome.damage_to_player, 30);
        assert_eq!(outcome.summary, RoundSummary::SpecialExchange);
    }

    #[test]
    fn test_special_attack_against_defender_is_halved() {
        let mut p = player(ElementalType::Scholar);
        let mut o = opponent(ElementalType::Scholar);
        let mut dice = ScriptedDice::new().with_rolls(&[35]);

        let outcome =
            resolve_round(ActionId::Defense, ActionId::StrongAttack, &mut p, &mut o, &mut dice);

        assert_eq!(outcome.damage_to_player, 17);
    }

    #[test]
    fn test_heal_applies_immediately() {
        let mut p = player(ElementalType::Scholar);
        let mut o = opponent(ElementalType::Scholar);
        p.apply_damage(50);
        let mut dice = ScriptedDice::new().with_rolls(&[30, 18]);

        let outcome = resolve_round(ActionId::Heal, ActionId::Paper, &mut p, &mut o, &mut dice);

        assert_eq!(outcome.player_heal, 30);
        assert_eq!(p.health(), 80);
        // Paper vs Scholar +50 -> 27, no exchange because heal is involved
        assert_eq!(outcome.damage_to_player, 27);
        assert_eq!(outcome.summary, RoundSummary::PlayerHealed { amount: 30 });
    }

    #[test]
    fn test_opponent_heal_summary() {
        let mut p = player(ElementalType::Scholar);
        let mut o = opponent(ElementalType::Scholar);
        o.apply_damage(10);
        let mut dice = ScriptedDice::new().with_rolls(&[35, 25]);

        let outcome =
            resolve_round(ActionId::StrongAttack, ActionId::Heal, &mut p, &mut o, &mut dice);

        assert_eq!(outcome.opponent_heal, 25);
        assert_eq!(o.health(), 80);
        assert_eq!(outcome.summary, RoundSummary::OpponentHealed { amount: 25 });
    }

    #[test]
    fn test_both_defend() {
        let mut p = player(ElementalType::Scholar);
        let mut o = opponent(ElementalType::Scholar);
        let mut dice = ScriptedDice::new();

        let outcome = resolve_round(ActionId::Defense, ActionId::Defense, &mut p, &mut o, &mut dice);

        assert_eq!(outcome.damage_to_opponent, 0);
        assert_eq!(outcome.damage_to_player, 0);
        assert_eq!(outcome.summary, RoundSummary::PlayerDefends);
        assert!(p.defending && o.defending);
    }
}
