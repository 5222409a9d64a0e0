// New player defaults
pub const DEFAULT_PLAYER_NAME: &str = "Hero";
pub const STARTING_HP: u32 = 80;
pub const STARTING_DAMAGE: u32 = 8;

// XP curve: max(XP_CURVE_BASE * level^XP_CURVE_EXPONENT + XP_PER_LEVEL_BONUS * level,
//               XP_FLOOR_BASE + XP_FLOOR_PER_LEVEL * level), capped at XP_REQUIRED_CAP
pub const XP_CURVE_BASE: f64 = 120.0;
pub const XP_CURVE_EXPONENT: f64 = 1.3;
pub const XP_PER_LEVEL_BONUS: f64 = 20.0;
pub const XP_FLOOR_BASE: f64 = 50.0;
pub const XP_FLOOR_PER_LEVEL: f64 = 10.0;
pub const XP_REQUIRED_CAP: u64 = 1_000_000;
// Past the curve's last level requirements grow linearly
pub const XP_CURVE_LAST_LEVEL: u32 = 100;
pub const XP_LINEAR_BASE: u64 = 50_000;
pub const XP_LINEAR_PER_LEVEL: u64 = 1_000;

// Level-up upgrades
pub const UPGRADE_MAX_HP: u32 = 15;
pub const UPGRADE_DAMAGE: u32 = 3;
pub const UPGRADE_GOLD_BONUS: u32 = 2;

// Enemy scaling: three linear segments joined at levels 5 and 10
pub const SCALING_SEGMENT_1_SLOPE: f64 = 0.3;
pub const SCALING_SEGMENT_2_START: f64 = 2.2;
pub const SCALING_SEGMENT_2_SLOPE: f64 = 0.25;
pub const SCALING_SEGMENT_3_START: f64 = 3.45;
pub const SCALING_SEGMENT_3_SLOPE: f64 = 0.2;
pub const ENEMY_STAT_VARIANCE_MIN: f64 = 0.9;
pub const ENEMY_STAT_VARIANCE_MAX: f64 = 1.1;
pub const ENEMY_XP_GROWTH_PER_LEVEL: f64 = 0.1;
pub const ENEMY_GOLD_GROWTH_PER_LEVEL: f64 = 0.15;

// Combat
pub const COMBO_BONUS_CAP: u32 = 10;
pub const SCORE_PER_CORRECT: u32 = 50;
pub const SCORE_PER_COMBO: u32 = 5;
pub const ANSWER_ATTEMPTS: u32 = 3;

// Rewards
pub const GOLD_PER_PLAYER_LEVEL: u32 = 3;
pub const DROP_CHANCE_PER_LEVEL: f64 = 0.02;
pub const DROP_CHANCE_LEVEL_BONUS_CAP: f64 = 0.2;

// Defeat penalty
pub const DEFEAT_GOLD_LOSS_DIVISOR: u32 = 4;
pub const DEFEAT_GOLD_LOSS_CAP: u32 = 50;
pub const DEFEAT_XP_LOSS_DIVISOR: u64 = 3;
pub const DEFEAT_XP_LOSS_CAP: u64 = 30;
pub const DEFEAT_HP_RECOVERY_DIVISOR: u32 = 4;

// Items
pub const POTION_HEAL: u32 = 30;
pub const POTION_PRICE: u32 = 50;
pub const SHIELD_PRICE: u32 = 100;

// Leaderboard
pub const LEADERBOARD_SIZE: usize = 10;

// Accounts
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 4;
pub const SALT_LEN: usize = 16;
pub const DEFAULT_ADMIN_NAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
