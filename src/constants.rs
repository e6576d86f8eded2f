// Combatant base stats
pub const PLAYER_BASE_MAX_HP: u32 = 100;
pub const OPPONENT_BASE_MAX_HP: u32 = 80;
pub const STARTING_LEVEL: u32 = 1;

// Level-up growth: +20% of base max HP per level gained (1/5)
pub const LEVEL_UP_HP_DIVISOR: u32 = 5;

// Opponent scaling: +30% of base max HP per opponent level (3/10)
pub const OPPONENT_HP_GROWTH_TENTHS: u32 = 3;

// Player heal between battles after a victory
pub const VICTORY_HEAL_PERCENT: u32 = 30;

// Type bonuses (percentage points added to a 100% base)
pub const WEAKNESS_BONUS_PERCENT: u32 = 50;
pub const STRENGTH_BONUS_PERCENT: u32 = 25;

// Elemental exchange multipliers: winner x1.5, loser x0.5
pub const EXCHANGE_WIN_NUMERATOR: u32 = 3;
pub const EXCHANGE_WIN_DENOMINATOR: u32 = 2;
pub const EXCHANGE_LOSS_DIVISOR: u32 = 2;

// Defense halves incoming damage
pub const DEFENSE_DAMAGE_DIVISOR: u32 = 2;

// Opponent action weights: Rock, Scissors, Paper, Heal, Defense, Strong Attack
pub const OPPONENT_ELEMENTAL_WEIGHT: f64 = 0.25;
pub const OPPONENT_HEAL_WEIGHT: f64 = 0.10;
pub const OPPONENT_DEFENSE_WEIGHT: f64 = 0.10;
pub const OPPONENT_SPECIAL_WEIGHT: f64 = 0.05;

// Timing (milliseconds)
pub const OPPONENT_DELAY_MS: u64 = 1000;
pub const ANNOUNCE_NOTICE_MS: u64 = 2500;
pub const CHOICE_NOTICE_MS: u64 = 1000;
pub const RESULT_NOTICE_MS: u64 = 3000;
pub const FRAME_MS: u64 = 50;
