use rand::Rng;
use tracing::info;

use super::types::{Enemy, Tier};
use crate::character::Player;
use crate::core::constants::{
    DEFEAT_GOLD_LOSS_CAP, DEFEAT_GOLD_LOSS_DIVISOR, DEFEAT_HP_RECOVERY_DIVISOR,
    DEFEAT_XP_LOSS_CAP, DEFEAT_XP_LOSS_DIVISOR, GOLD_PER_PLAYER_LEVEL,
};
use crate::core::progression::{apply_experience, LevelUp, UpgradeChooser};
use crate::items::{add_item, roll_item_drop, ItemKind};

/// Everything a victory granted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictoryRewards {
    pub xp: u64,
    pub gold: u32,
    /// Gold granted by the player's level (part of `gold`).
    pub level_gold: u32,
    /// Gold granted by the player's gold bonus (part of `gold`).
    pub bonus_gold: u32,
    pub item: Option<ItemKind>,
    pub level_ups: Vec<LevelUp>,
}

/// Everything a defeat cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefeatPenalty {
    pub gold_lost: u32,
    pub xp_lost: u64,
    /// HP the player was revived with.
    pub hp_after: u32,
}

/// Victory gold: enemy base + 3 per player level + the player's gold bonus.
pub fn victory_gold(player: &Player, enemy: &Enemy) -> u32 {
    enemy
        .gold_base
        .saturating_add(GOLD_PER_PLAYER_LEVEL.saturating_mul(player.level))
        .saturating_add(player.gold_bonus)
}

/// Grants gold, a possible item drop, and XP for beating `enemy`.
///
/// Gold and drop chance use the player's level as it was when the battle was
/// won; level-ups from the XP only affect later victories.
pub fn apply_victory_rewards(
    player: &mut Player,
    enemy: &Enemy,
    tier: Tier,
    rng: &mut impl Rng,
    chooser: &mut impl UpgradeChooser,
) -> VictoryRewards {
    let level_gold = GOLD_PER_PLAYER_LEVEL.saturating_mul(player.level);
    let bonus_gold = player.gold_bonus;
    let gold = victory_gold(player, enemy);
    player.gold = player.gold.saturating_add(gold);

    let item = roll_item_drop(tier, player.level, rng);
    if let Some(kind) = item {
        add_item(player, kind, 1);
    }

    let xp = enemy.xp_reward as u64;
    let level_ups = apply_experience(player, xp, chooser);

    info!(
        player = %player.name,
        enemy = %enemy.name,
        %tier,
        xp,
        gold,
        item = item.map(|k| k.key()),
        levels = level_ups.len(),
        "victory rewards"
    );
    VictoryRewards {
        xp,
        gold,
        level_gold,
        bonus_gold,
        item,
        level_ups,
    }
}

/// Takes a quarter of the player's gold (at most 50) and a third of their
/// current XP (at most 30), then revives them at a quarter of max HP.
pub fn apply_defeat_penalty(player: &mut Player) -> DefeatPenalty {
    let gold_lost = (player.gold / DEFEAT_GOLD_LOSS_DIVISOR).min(DEFEAT_GOLD_LOSS_CAP);
    let xp_lost = (player.xp / DEFEAT_XP_LOSS_DIVISOR).min(DEFEAT_XP_LOSS_CAP);
    player.gold = player.gold.saturating_sub(gold_lost);
    player.xp = player.xp.saturating_sub(xp_lost);
    player.hp = (player.max_hp / DEFEAT_HP_RECOVERY_DIVISOR).max(1);
    player.combo = 0;

    info!(player = %player.name, gold_lost, xp_lost, hp = player.hp, "defeat penalty");
    DefeatPenalty {
        gold_lost,
        xp_lost,
        hp_after: player.hp,
    }
}
