//! Battle session: the turn state machine driving one player against a
//! string of opponents.
//!
//! Phases: `AwaitingPlayer` -> `AwaitingOpponent` (choice submitted) ->
//! `RoundResolved` (opponent chose, round resolved) -> `AwaitingPlayer`
//! on continue, or `BattleOver` when someone is knocked out.

use super::actions::ActionId;
use super::dice::Dice;
use super::logic::resolve_round;
use super::opponent::choose_opponent_action;
use super::types::{
    BattlePhase, BattleResult, Combatant, Cooldowns, ElementalType, Notice, RoundOutcome, Side,
    Submission,
};
use crate::config::BattleConfig;
use crate::constants::*;

/// Max health of an opponent fought at `level`: `80 * (1 + (level - 1) * 0.3)`.
pub fn opponent_max_health(level: u32) -> u32 {
    let level = level.max(1);
    OPPONENT_BASE_MAX_HP * (10 + (level - 1) * OPPONENT_HP_GROWTH_TENTHS) / 10
}

fn random_element<D: Dice>(dice: &mut D) -> ElementalType {
    ElementalType::from_index(dice.pick(ElementalType::ALL.len()))
}

/// Fresh level-1 player with a random elemental type.
pub fn spawn_player<D: Dice>(name: &str, dice: &mut D) -> Combatant {
    Combatant::new(
        name,
        Side::Player,
        STARTING_LEVEL,
        PLAYER_BASE_MAX_HP,
        random_element(dice),
    )
}

/// Opponent scaled to `level` with a random elemental type.
pub fn spawn_opponent<D: Dice>(name: &str, level: u32, dice: &mut D) -> Combatant {
    Combatant::new(
        name,
        Side::Opponent,
        level,
        opponent_max_health(level),
        random_element(dice),
    )
}

#[derive(Debug, Clone)]
pub struct BattleSession {
    config: BattleConfig,
    player: Combatant,
    opponent: Combatant,
    player_cooldowns: Cooldowns,
    opponent_cooldowns: Cooldowns,
    phase: BattlePhase,
    player_choice: Option<ActionId>,
    opponent_choice: Option<ActionId>,
    outcome: Option<RoundOutcome>,
    result: Option<BattleResult>,
    wins: u32,
    opponent_level: u32,
    /// Rounds resolved in the current battle.
    round: u32,
    opponent_wait_ms: u64,
    notice: Option<Notice>,
}

impl BattleSession {
    pub fn new<D: Dice>(config: BattleConfig, dice: &mut D) -> Self {
        let player = spawn_player(&config.player_name, dice);
        let opponent = spawn_opponent(&config.opponent_name, STARTING_LEVEL, dice);

        let mut session = Self {
            config,
            player,
            opponent,
            player_cooldowns: Cooldowns::new(),
            opponent_cooldowns: Cooldowns::new(),
            phase: BattlePhase::AwaitingPlayer,
            player_choice: None,
            opponent_choice: None,
            outcome: None,
            result: None,
            wins: 0,
            opponent_level: STARTING_LEVEL,
            round: 0,
            opponent_wait_ms: 0,
            notice: None,
        };

        tracing::info!(
            player_type = %session.player.element,
            opponent_type = %session.opponent.element,
            "battle started"
        );
        let text = format!(
            "Battle begins! You are {} against {}",
            session.player.element, session.opponent.element
        );
        session.notify(text, session.config.announce_ms);
        session
    }

    // ── Queries ───────────────────────────────────────────────────────

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn opponent(&self) -> &Combatant {
        &self.opponent
    }

    pub fn player_cooldowns(&self) -> &Cooldowns {
        &self.player_cooldowns
    }

    pub fn opponent_cooldowns(&self) -> &Cooldowns {
        &self.opponent_cooldowns
    }

    pub fn player_choice(&self) -> Option<ActionId> {
        self.player_choice
    }

    pub fn opponent_choice(&self) -> Option<ActionId> {
        self.opponent_choice
    }

    /// Outcome of the round awaiting `continue_round`, or of the final round
    /// once the battle is over.
    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    pub fn result(&self) -> Option<BattleResult> {
        self.result
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Level the next opponent will be created at.
    pub fn opponent_level(&self) -> u32 {
        self.opponent_level
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn opponent_wait_ms(&self) -> u64 {
        self.opponent_wait_ms
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    // ── Signals ───────────────────────────────────────────────────────

    /// Submits the player's action for this round.
    pub fn submit_player_action(&mut self, action: ActionId) -> Submission {
        if self.phase != BattlePhase::AwaitingPlayer {
            tracing::debug!(?action, phase = ?self.phase, "submission rejected: not player turn");
            return Submission::NotYourTurn;
        }

        let remaining = self.player_cooldowns.remaining(action);
        if remaining > 0 {
            tracing::debug!(?action, remaining, "submission rejected: on cooldown");
            self.notify(
                format!("{} is on cooldown ({} more)!", action, remaining),
                self.config.notice_ms,
            );
            return Submission::OnCooldown { remaining };
        }

        self.player_choice = Some(action);
        self.player_cooldowns.arm(action);
        self.phase = BattlePhase::AwaitingOpponent;
        self.opponent_wait_ms = self.config.opponent_delay_ms;
        self.notify(format!("You chose {}...", action), self.config.notice_ms);
        tracing::debug!(?action, "player action accepted");
        Submission::Accepted
    }

    /// Advances timers by `elapsed_ms`; the opponent picks once its wait runs out.
    pub fn tick<D: Dice>(&mut self, elapsed_ms: u64, dice: &mut D) {
        if let Some(notice) = &mut self.notice {
            notice.remaining_ms = notice.remaining_ms.saturating_sub(elapsed_ms);
            if notice.remaining_ms == 0 {
                self.notice = None;
            }
        }

        if self.phase == BattlePhase::AwaitingOpponent {
            self.opponent_wait_ms = self.opponent_wait_ms.saturating_sub(elapsed_ms);
            if self.opponent_wait_ms == 0 {
                self.opponent_turn(dice);
            }
        }
    }

    /// Skips the current wait: forces the opponent's choice, or applies a
    /// resolved round. Returns false when there was nothing to skip.
    pub fn skip_wait<D: Dice>(&mut self, dice: &mut D) -> bool {
        match self.phase {
            BattlePhase::AwaitingOpponent => {
                self.opponent_turn(dice);
                true
            }
            BattlePhase::RoundResolved => self.continue_round(),
            BattlePhase::AwaitingPlayer | BattlePhase::BattleOver => false,
        }
    }

    /// Applies the resolved round and moves on. Returns false outside
    /// `RoundResolved`.
    pub fn continue_round(&mut self) -> bool {
        if self.phase != BattlePhase::RoundResolved {
            return false;
        }
        if self.apply_round().is_none() {
            self.reset_round();
        }
        true
    }

    /// Starts the next battle after the current one ended. Returns false
    /// unless the battle is over.
    pub fn start_new_battle<D: Dice>(&mut self, dice: &mut D) -> bool {
        if self.result.is_none() {
            return false;
        }

        // A knocked-out player restarts from scratch, even after a double
        // knockout that was recorded as a win.
        if self.player.is_defeated() {
            self.player = spawn_player(&self.config.player_name, dice);
            self.opponent_level = STARTING_LEVEL;
            self.opponent = spawn_opponent(&self.config.opponent_name, self.opponent_level, dice);
            self.wins = 0;
        } else {
            self.opponent = spawn_opponent(&self.config.opponent_name, self.opponent_level, dice);
            let heal = self.player.max_health() * VICTORY_HEAL_PERCENT / 100;
            self.player.heal(heal);
        }

        self.player_cooldowns.clear();
        self.opponent_cooldowns.clear();
        self.result = None;
        self.round = 0;
        self.reset_round();

        tracing::info!(
            opponent_level = self.opponent_level,
            opponent_max_health = self.opponent.max_health(),
            player_health = self.player.health(),
            "new battle"
        );
        let text = format!(
            "New battle! {} against {}",
            self.player.element, self.opponent.element
        );
        self.notify(text, self.config.announce_ms);
        true
    }

    // ── Internals ─────────────────────────────────────────────────────

    fn notify(&mut self, text: String, duration_ms: u64) {
        self.notice = Some(Notice {
            text,
            remaining_ms: duration_ms,
        });
    }

    fn opponent_turn<D: Dice>(&mut self, dice: &mut D) {
        let Some(player_action) = self.player_choice else {
            return;
        };
        let opponent_action = choose_opponent_action(&mut self.opponent_cooldowns, dice);
        self.opponent_choice = Some(opponent_action);
        self.opponent_wait_ms = 0;

        let outcome = resolve_round(
            player_action,
            opponent_action,
            &mut self.player,
            &mut self.opponent,
            dice,
        );
        tracing::info!(
            round = self.round + 1,
            player_action = %player_action,
            opponent_action = %opponent_action,
            damage_to_opponent = outcome.damage_to_opponent,
            damage_to_player = outcome.damage_to_player,
            player_heal = outcome.player_heal,
            opponent_heal = outcome.opponent_heal,
            "round resolved: {}",
            outcome.summary
        );
        self.outcome = Some(outcome);
        self.phase = BattlePhase::RoundResolved;
    }

    /// Lands damage, clears defense, ticks cooldowns and checks for a
    /// knockout. Opponent defeat wins ties.
    fn apply_round(&mut self) -> Option<BattleResult> {
        let outcome = self.outcome?;

        let opponent_down = self.opponent.apply_damage(outcome.damage_to_opponent);
        let player_down = self.player.apply_damage(outcome.damage_to_player);

        self.player.defending = false;
        self.opponent.defending = false;
        self.player_cooldowns.tick();
        self.opponent_cooldowns.tick();
        self.round += 1;

        let result = if opponent_down {
            self.wins += 1;
            self.opponent_level += 1;
            self.notify(
                format!("Victory! The rival is down. Win streak: {}", self.wins),
                self.config.result_notice_ms,
            );
            BattleResult::Victory
        } else if player_down {
            self.wins = 0;
            self.opponent_level = self.opponent_level.saturating_sub(1).max(STARTING_LEVEL);
            self.notify(
                "Defeat! Your win streak was reset.".to_string(),
                self.config.result_notice_ms,
            );
            BattleResult::Defeat
        } else {
            return None;
        };

        tracing::info!(
            ?result,
            wins = self.wins,
            next_opponent_level = self.opponent_level,
            rounds = self.round,
            "battle over"
        );
        self.result = Some(result);
        self.phase = BattlePhase::BattleOver;
        Some(result)
    }

    fn reset_round(&mut self) {
        self.player_choice = None;
        self.opponent_choice = None;
        self.outcome = None;
        self.player.defending = false;
        self.opponent.defending = false;
        self.opponent_wait_ms = 0;
        self.phase = BattlePhase::AwaitingPlayer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::dice::scripted::ScriptedDice;
    use crate::battle::types::RoundSummary;

    /// Session with both sides set to Scholar (no Rock bonus either way).
    fn scholar_session() -> BattleSession {
        // Element picks: player, opponent
        let mut dice = ScriptedDice::new().with_picks(&[2, 2]);
        BattleSession::new(BattleConfig::default(), &mut dice)
    }

    fn play_round(
        session: &mut BattleSession,
        player: ActionId,
        opponent: ActionId,
        rolls: &[u32],
    ) -> RoundOutcome {
        assert!(session.submit_player_action(player).is_accepted());
        // The opponent's weighted pick indexes into its ready actions
        let pick = ActionId::ALL
            .into_iter()
            .filter(|action| session.opponent_cooldowns().is_ready(*action))
            .position(|action| action == opponent)
            .expect("opponent action must be ready");
        let mut dice = ScriptedDice::new().with_picks(&[pick]).with_rolls(rolls);
        assert!(session.skip_wait(&mut dice));
        *session.last_outcome().unwrap()
    }

    #[test]
    fn test_new_session_starts_awaiting_player() {
        let session = scholar_session();
        assert_eq!(session.phase(), BattlePhase::AwaitingPlayer);
        assert_eq!(session.player().max_health(), 100);
        assert_eq!(session.opponent().max_health(), 80);
        assert_eq!(session.player().element, ElementalType::Scholar);
        assert_eq!(session.opponent_level(), 1);
        assert_eq!(session.wins(), 0);
        assert!(session.notice().unwrap().text.starts_with("Battle begins!"));
    }

    #[test]
    fn test_submission_rejected_outside_player_turn() {
        let mut session = scholar_session();
        assert!(session.submit_player_action(ActionId::Rock).is_accepted());
        assert_eq!(
            session.submit_player_action(ActionId::Paper),
            Submission::NotYourTurn
        );
        assert_eq!(session.player_choice(), Some(ActionId::Rock));
        assert_eq!(session.phase(), BattlePhase::AwaitingOpponent);
    }

    #[test]
    fn test_submission_on_cooldown_is_distinguishable() {
        let mut session = scholar_session();
        play_round(&mut session, ActionId::Heal, ActionId::Rock, &[20, 20]);
        assert!(session.continue_round());

        // Heal cooldown 2, one round passed
        assert_eq!(
            session.submit_player_action(ActionId::Heal),
            Submission::OnCooldown { remaining: 1 }
        );
        assert_eq!(session.phase(), BattlePhase::AwaitingPlayer);
        assert!(session.notice().unwrap().text.contains("cooldown"));
    }

    #[test]
    fn test_tick_triggers_opponent_after_delay() {
        let mut session = scholar_session();
        session.submit_player_action(ActionId::Rock);
        let mut dice = ScriptedDice::new().with_picks(&[0]).with_rolls(&[20, 20]);

        session.tick(400, &mut dice);
        assert_eq!(session.phase(), BattlePhase::AwaitingOpponent);
        assert_eq!(session.opponent_wait_ms(), 600);

        session.tick(600, &mut dice);
        assert_eq!(session.phase(), BattlePhase::RoundResolved);
        assert_eq!(session.opponent_choice(), Some(ActionId::Rock));
        assert!(session.last_outcome().is_some());
    }

    #[test]
    fn test_tick_expires_notice() {
        let mut session = scholar_session();
        let mut dice = ScriptedDice::new();
        session.tick(ANNOUNCE_NOTICE_MS - 1, &mut dice);
        assert!(session.notice().is_some());
        session.tick(1, &mut dice);
        assert!(session.notice().is_none());
    }

    #[test]
    fn test_skip_wait_nothing_to_skip() {
        let mut session = scholar_session();
        let mut dice = ScriptedDice::new();
        assert!(!session.skip_wait(&mut dice));
        assert!(!session.continue_round());
    }

    #[test]
    fn test_rps_win_scenario_applies_37() {
        let mut session = scholar_session();
        let outcome = play_round(&mut session, ActionId::Rock, ActionId::Scissors, &[25, 15]);
        assert_eq!(outcome.damage_to_opponent, 37);

        // Not applied until continue
        assert_eq!(session.opponent().health(), 80);
        assert!(session.continue_round());
        assert_eq!(session.opponent().health(), 43);
        assert_eq!(session.phase(), BattlePhase::AwaitingPlayer);
        assert!(session.last_outcome().is_none());
        assert_eq!(session.round(), 1);
    }

    #[test]
    fn test_defense_lasts_one_round() {
        let mut session = scholar_session();
        let outcome = play_round(&mut session, ActionId::Defense, ActionId::Rock, &[30]);
        assert_eq!(outcome.damage_to_player, 15);
        assert!(session.player().defending);

        session.continue_round();
        assert!(!session.player().defending);
        assert_eq!(session.player().health(), 85);

        let outcome = play_round(&mut session, ActionId::Paper, ActionId::Rock, &[18, 30]);
        // Paper beats Rock; player no longer defending: 30 * 0.5
        assert_eq!(outcome.damage_to_player, 15);
        assert_eq!(
            outcome.summary,
            RoundSummary::PlayerWinsExchange {
                winner: ActionId::Paper,
                loser: ActionId::Rock
            }
        );
    }

    #[test]
    fn test_cooldowns_tick_once_per_round() {
        let mut session = scholar_session();
        play_round(&mut session, ActionId::StrongAttack, ActionId::Heal, &[30, 20]);
        assert_eq!(session.player_cooldowns().remaining(ActionId::StrongAttack), 3);
        assert_eq!(session.opponent_cooldowns().remaining(ActionId::Heal), 2);

        session.continue_round();
        assert_eq!(session.player_cooldowns().remaining(ActionId::StrongAttack), 2);
        assert_eq!(session.opponent_cooldowns().remaining(ActionId::Heal), 1);

        play_round(&mut session, ActionId::Rock, ActionId::Rock, &[20, 20]);
        session.continue_round();
        play_round(&mut session, ActionId::Rock, ActionId::Rock, &[20, 20]);
        session.continue_round();
        assert!(session.player_cooldowns().is_ready(ActionId::StrongAttack));
        assert!(session.opponent_cooldowns().is_ready(ActionId::Heal));
        assert_eq!(session.player_cooldowns().active().count(), 0);
    }

    #[test]
    fn test_loss_scenario() {
        let mut session = scholar_session();
        session.player.apply_damage(70);
        assert_eq!(session.player().health(), 30);
        session.wins = 4;
        session.opponent_level = 3;

        // 40 rolled on the strong attack, no bonus for Scholar against Scholar
        let outcome = play_round(&mut session, ActionId::Rock, ActionId::StrongAttack, &[20, 40]);
        assert_eq!(outcome.damage_to_player, 40);
        assert_eq!(outcome.opponent_type_bonus, 0);
        session.continue_round();

        assert_eq!(session.player().health(), 0);
        assert_eq!(session.opponent().health(), 60);
        assert_eq!(session.phase(), BattlePhase::BattleOver);
        assert_eq!(session.result(), Some(BattleResult::Defeat));
        assert_eq!(session.wins(), 0);
        assert_eq!(session.opponent_level(), 2);
    }

    #[test]
    fn test_opponent_level_never_below_one() {
        let mut session = scholar_session();
        session.player.apply_damage(99);
        play_round(&mut session, ActionId::Rock, ActionId::Rock, &[20, 20]);
        session.continue_round();
        assert_eq!(session.result(), Some(BattleResult::Defeat));
        assert_eq!(session.opponent_level(), 1);
    }

    #[test]
    fn test_simultaneous_knockout_counts_as_victory() {
        let mut session = scholar_session();
        session.player.apply_damage(95);
        session.opponent.apply_damage(75);

        play_round(&mut session, ActionId::Rock, ActionId::Rock, &[20, 20]);
        session.continue_round();

        assert_eq!(session.player().health(), 0);
        assert_eq!(session.opponent().health(), 0);
        assert_eq!(session.result(), Some(BattleResult::Victory));
        assert_eq!(session.wins(), 1);
        assert_eq!(session.opponent_level(), 2);
    }

    #[test]
    fn test_new_battle_after_double_knockout_resets_everything() {
        let mut session = scholar_session();
        session.player.apply_damage(95);
        session.opponent.apply_damage(75);
        play_round(&mut session, ActionId::Rock, ActionId::Rock, &[20, 20]);
        session.continue_round();
        assert_eq!(session.result(), Some(BattleResult::Victory));

        let mut dice = ScriptedDice::new().with_picks(&[0, 3]);
        assert!(session.start_new_battle(&mut dice));

        assert_eq!(session.wins(), 0);
        assert_eq!(session.opponent_level(), 1);
        assert_eq!(session.opponent().max_health(), 80);
        assert_eq!(session.player().health(), 100);
        assert_eq!(session.player().max_health(), 100);
        assert_eq!(session.phase(), BattlePhase::AwaitingPlayer);
    }

    #[test]
    fn test_battle_over_blocks_round_signals() {
        let mut session = scholar_session();
        session.opponent.apply_damage(79);
        play_round(&mut session, ActionId::Rock, ActionId::Rock, &[20, 20]);
        session.continue_round();
        assert_eq!(session.phase(), BattlePhase::BattleOver);

        let mut dice = ScriptedDice::new();
        assert_eq!(
            session.submit_player_action(ActionId::Rock),
            Submission::NotYourTurn
        );
        assert!(!session.skip_wait(&mut dice));
        assert!(!session.continue_round());
        // The final outcome stays visible
        assert!(session.last_outcome().is_some());
    }

    #[test]
    fn test_new_battle_after_victory_scales_opponent_and_heals() {
        let mut session = scholar_session();
        session.player.apply_damage(90);
        session.opponent.apply_damage(79);
        play_round(&mut session, ActionId::StrongAttack, ActionId::Defense, &[30]);
        session.continue_round();
        assert_eq!(session.result(), Some(BattleResult::Victory));
        assert_eq!(session.player().health(), 10);

        let mut dice = ScriptedDice::new().with_picks(&[1]);
        assert!(session.start_new_battle(&mut dice));

        assert_eq!(session.opponent().level(), 2);
        assert_eq!(session.opponent().max_health(), 104);
        assert_eq!(session.opponent().health(), 104);
        assert_eq!(session.opponent().element, ElementalType::Rogue);
        // floor(100 * 0.3) = 30
        assert_eq!(session.player().health(), 40);
        assert_eq!(session.wins(), 1);
        assert_eq!(session.phase(), BattlePhase::AwaitingPlayer);
        assert!(session.player_cooldowns().is_ready(ActionId::StrongAttack));
        assert!(session.opponent_cooldowns().is_ready(ActionId::Defense));
        assert_eq!(session.result(), None);
        assert_eq!(session.round(), 0);
    }

    #[test]
    fn test_new_battle_heal_is_capped() {
        let mut session = scholar_session();
        session.opponent.apply_damage(79);
        play_round(&mut session, ActionId::Rock, ActionId::Defense, &[20]);
        session.continue_round();
        assert_eq!(session.result(), Some(BattleResult::Victory));

        let mut dice = ScriptedDice::new();
        session.start_new_battle(&mut dice);
        assert_eq!(session.player().health(), session.player().max_health());
    }

    #[test]
    fn test_new_battle_after_defeat_resets_everything() {
        let mut session = scholar_session();
        session.wins = 3;
        session.opponent_level = 4;
        session.player.apply_damage(99);
        play_round(&mut session, ActionId::Heal, ActionId::StrongAttack, &[20, 40]);
        session.continue_round();
        assert_eq!(session.result(), Some(BattleResult::Defeat));

        let mut dice = ScriptedDice::new().with_picks(&[0, 3]);
        assert!(session.start_new_battle(&mut dice));

        assert_eq!(session.player().level(), 1);
        assert_eq!(session.player().health(), 100);
        assert_eq!(session.player().element, ElementalType::Balanced);
        assert_eq!(session.opponent().level(), 1);
        assert_eq!(session.opponent().max_health(), 80);
        assert_eq!(session.opponent().element, ElementalType::Brawler);
        assert_eq!(session.opponent_level(), 1);
        assert_eq!(session.wins(), 0);
        assert_eq!(session.player_cooldowns().active().count(), 0);
    }

    #[test]
    fn test_start_new_battle_requires_battle_over() {
        let mut session = scholar_session();
        let mut dice = ScriptedDice::new();
        assert!(!session.start_new_battle(&mut dice));
    }

    #[test]
    fn test_opponent_max_health_formula() {
        assert_eq!(opponent_max_health(1), 80);
        assert_eq!(opponent_max_health(2), 104);
        assert_eq!(opponent_max_health(3), 128);
        assert_eq!(opponent_max_health(4), 152);
        assert_eq!(opponent_max_health(0), 80);
    }
}
