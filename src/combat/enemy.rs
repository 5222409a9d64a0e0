use rand::Rng;
use tracing::debug;

use super::types::{Enemy, Tier};
use crate::core::constants::{
    ENEMY_GOLD_GROWTH_PER_LEVEL, ENEMY_STAT_VARIANCE_MAX, ENEMY_STAT_VARIANCE_MIN,
    ENEMY_XP_GROWTH_PER_LEVEL,
};
use crate::core::progression::scaling_factor;

/// Name variants per tier, weakest first.
fn tier_name_variants(tier: Tier) -> &'static [&'static str] {
    match tier {
        Tier::Easy => &[
            "Slime", "Green Slime", "Acid Slime", "Giant Slime", "Toxic Slime",
            "Crystal Slime", "Shadow Slime", "Ancient Slime", "Void Slime", "Primordial Slime",
        ],
        Tier::Medium => &[
            "Goblin", "Goblin Scout", "Goblin Warrior", "Goblin Berserker", "Goblin Champion",
            "Goblin Chieftain", "Goblin Warlord", "Goblin King", "Demon Goblin", "Goblin Overlord",
        ],
        Tier::Hard => &[
            "Orc", "Orc Brute", "Orc Warrior", "Orc Savage", "Orc Destroyer",
            "Orc Warchief", "Orc Juggernaut", "Orc Warlord", "Demon Orc", "Orc Titan",
        ],
        Tier::Boss => &[
            "Dragon", "Young Dragon", "Adult Dragon", "Elder Dragon", "Ancient Dragon",
            "Wyrm Dragon", "Shadow Dragon", "Void Dragon", "Primordial Dragon", "Cosmic Dragon",
        ],
    }
}

/// Picks a tier name for the player's level: one step per level up to 10,
/// then one step every three levels, clamped to the strongest variant.
pub fn enemy_name_variant(tier: Tier, player_level: u32) -> &'static str {
    let variants = tier_name_variants(tier);
    let index = match player_level {
        0..=1 => 0,
        2..=10 => (player_level - 1) as usize,
        _ => 8 + ((player_level - 10) / 3) as usize,
    };
    variants[index.min(variants.len() - 1)]
}

/// Scales a base stat, never dropping below the base.
fn scaled_stat(base: u32, factor: f64, variance: f64) -> u32 {
    ((base as f64 * factor * variance).round() as u32).max(base)
}

fn grown_reward(base: u32, player_level: u32, growth_per_level: f64) -> u32 {
    let levels = player_level.saturating_sub(1) as f64;
    (base as f64 * (1.0 + levels * growth_per_level)).round() as u32
}

/// Builds an opponent for `tier` scaled to `player_level`.
///
/// HP and damage share one variance draw in [0.9, 1.1] and are floored at
/// the tier's base values.
pub fn make_enemy(tier: Tier, player_level: u32, rng: &mut impl Rng) -> Enemy {
    let base = tier.stats();
    let factor = scaling_factor(player_level);
    let variance = rng.gen_range(ENEMY_STAT_VARIANCE_MIN..=ENEMY_STAT_VARIANCE_MAX);

    let hp = scaled_stat(base.hp, factor, variance).max(1);
    let damage = scaled_stat(base.damage, factor, variance).max(1);
    let enemy = Enemy::new(
        enemy_name_variant(tier, player_level).to_string(),
        hp,
        damage,
        grown_reward(base.xp, player_level, ENEMY_XP_GROWTH_PER_LEVEL),
        grown_reward(base.gold, player_level, ENEMY_GOLD_GROWTH_PER_LEVEL),
    );
    debug!(%tier, player_level, factor, variance, ?enemy, "enemy created");
    enemy
}
