//! Experience curve, level-up upgrades, and enemy scaling by player level.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::constants::*;
use crate::character::Player;

/// Permanent stat boost picked on each level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Upgrade {
    /// +15 max HP, and a full heal to the new maximum.
    MaxHp,
    /// +3 damage.
    Damage,
    /// +2 gold on every future victory.
    GoldBonus,
}

impl Upgrade {
    pub const ALL: [Upgrade; 3] = [Upgrade::MaxHp, Upgrade::Damage, Upgrade::GoldBonus];

    pub fn description(&self) -> &'static str {
        match self {
            Upgrade::MaxHp => "+15 Max HP",
            Upgrade::Damage => "+3 Damage",
            Upgrade::GoldBonus => "+2 Gold per victory bonus",
        }
    }
}

/// Picks the upgrade for a level-up. Called once per level gained, after the
/// player's level has been incremented.
pub trait UpgradeChooser {
    fn choose(&mut self, player: &Player) -> Upgrade;
}

impl<F: FnMut(&Player) -> Upgrade> UpgradeChooser for F {
    fn choose(&mut self, player: &Player) -> Upgrade {
        self(player)
    }
}

/// Record of a single level gained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: u32,
    pub upgrade: Upgrade,
    /// HP restored by a max-HP upgrade's heal.
    pub hp_restored: u32,
}

/// XP needed to advance from `level` to `level + 1`.
pub fn experience_required(level: u32) -> u64 {
    let level = level.max(1);
    if level > XP_CURVE_LAST_LEVEL {
        return XP_LINEAR_BASE + XP_LINEAR_PER_LEVEL * (level - XP_CURVE_LAST_LEVEL) as u64;
    }
    let l = level as f64;
    let curve = XP_CURVE_BASE * l.powf(XP_CURVE_EXPONENT) + XP_PER_LEVEL_BONUS * l;
    let floor = XP_FLOOR_BASE + XP_FLOOR_PER_LEVEL * l;
    (curve.max(floor).floor() as u64).min(XP_REQUIRED_CAP)
}

/// Applies a single upgrade to `player`, returning HP restored by it.
pub fn apply_upgrade(player: &mut Player, upgrade: Upgrade) -> u32 {
    match upgrade {
        Upgrade::MaxHp => {
            player.max_hp = player.max_hp.saturating_add(UPGRADE_MAX_HP);
            player.heal_full()
        }
        Upgrade::Damage => {
            player.damage = player.damage.saturating_add(UPGRADE_DAMAGE);
            0
        }
        Upgrade::GoldBonus => {
            player.gold_bonus = player.gold_bonus.saturating_add(UPGRADE_GOLD_BONUS);
            0
        }
    }
}

/// Adds XP and resolves every level-up it triggers, each with its own
/// upgrade choice. Returns the level-ups in order; empty when none occurred.
pub fn apply_experience(
    player: &mut Player,
    amount: u64,
    chooser: &mut impl UpgradeChooser,
) -> Vec<LevelUp> {
    player.xp = player.xp.saturating_add(amount);
    let mut level_ups = Vec::new();

    loop {
        let required = experience_required(player.level);
        if player.xp < required {
            break;
        }
        player.xp -= required;
        player.level = player.level.saturating_add(1);

        let upgrade = chooser.choose(player);
        let hp_restored = apply_upgrade(player, upgrade);
        info!(
            player = %player.name,
            level = player.level,
            ?upgrade,
            hp_restored,
            "level up"
        );
        level_ups.push(LevelUp {
            new_level: player.level,
            upgrade,
            hp_restored,
        });
    }

    level_ups
}

/// Multiplier applied to enemy base stats for a player of `level`.
///
/// Piecewise linear: +0.3/level up to 5, +0.25/level up to 10, +0.2/level after.
pub fn scaling_factor(level: u32) -> f64 {
    match level {
        0..=1 => 1.0,
        2..=5 => 1.0 + (level - 1) as f64 * SCALING_SEGMENT_1_SLOPE,
        6..=10 => SCALING_SEGMENT_2_START + (level - 5) as f64 * SCALING_SEGMENT_2_SLOPE,
        _ => SCALING_SEGMENT_3_START + (level - 10) as f64 * SCALING_SEGMENT_3_SLOPE,
    }
}
