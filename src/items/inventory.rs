use tracing::debug;

use super::types::ItemKind;
use crate::character::Player;
use crate::core::constants::POTION_HEAL;
use crate::error::{GameError, Result};

/// What happened when an item was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    /// HP actually restored (may be less than the potion's strength near max HP).
    Healed(u32),
    ShieldRaised,
}

pub fn add_item(player: &mut Player, kind: ItemKind, quantity: u32) {
    let count = player.inventory.entry(kind).or_insert(0);
    *count = count.saturating_add(quantity.max(1));
}

/// Consumes one `kind` from the inventory and applies its effect.
pub fn use_item(player: &mut Player, kind: ItemKind) -> Result<ItemEffect> {
    match player.inventory.get_mut(&kind) {
        Some(count) if *count > 0 => *count -= 1,
        _ => return Err(GameError::ItemNotOwned(kind)),
    }

    let effect = match kind {
        ItemKind::Potion => ItemEffect::Healed(player.heal(POTION_HEAL)),
        ItemKind::Shield => {
            player.shield_active = true;
            ItemEffect::ShieldRaised
        }
    };
    debug!(player = %player.name, item = kind.key(), ?effect, "item used");
    Ok(effect)
}

/// Buys one `kind` at catalog price.
pub fn buy_item(player: &mut Player, kind: ItemKind) -> Result<()> {
    let price = kind.info().price;
    if player.gold < price {
        return Err(GameError::NotEnoughGold {
            needed: price,
            have: player.gold,
        });
    }
    player.gold -= price;
    add_item(player, kind, 1);
    debug!(player = %player.name, item = kind.key(), gold_left = player.gold, "item purchased");
    Ok(())
}

/// Items with a positive count, in catalog order.
pub fn usable_items(player: &Player) -> Vec<(ItemKind, u32)> {
    ItemKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let count = player.item_count(kind);
            (count > 0).then_some((kind, count))
        })
        .collect()
}
