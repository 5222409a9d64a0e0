use rand::Rng;

use super::types::ItemKind;
use crate::combat::types::Tier;
use crate::core::constants::{DROP_CHANCE_LEVEL_BONUS_CAP, DROP_CHANCE_PER_LEVEL};

/// Chance that a victory drops an item: tier base plus a capped level bonus.
pub fn item_drop_chance(tier: Tier, player_level: u32) -> f64 {
    let level_bonus = (player_level as f64 * DROP_CHANCE_PER_LEVEL).min(DROP_CHANCE_LEVEL_BONUS_CAP);
    tier.stats().drop_chance + level_bonus
}

/// Rolls a victory drop. A single draw decides whether anything drops; the
/// kind is then uniform over the catalog.
pub fn roll_item_drop(tier: Tier, player_level: u32, rng: &mut impl Rng) -> Option<ItemKind> {
    if rng.gen::<f64>() >= item_drop_chance(tier, player_level) {
        return None;
    }
    Some(ItemKind::ALL[rng.gen_range(0..ItemKind::ALL.len())])
}
