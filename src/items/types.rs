use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::{POTION_PRICE, SHIELD_PRICE};

/// Consumables sold in the shop and dropped by defeated enemies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Potion,
    Shield,
}

/// Static catalog entry for an item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub price: u32,
}

impl ItemKind {
    /// Every kind in shop order.
    pub const ALL: [ItemKind; 2] = [ItemKind::Potion, ItemKind::Shield];

    pub fn info(&self) -> ItemInfo {
        match self {
            ItemKind::Potion => ItemInfo {
                name: "Healing Potion",
                description: "Restores 30 HP",
                price: POTION_PRICE,
            },
            ItemKind::Shield => ItemInfo {
                name: "Shield",
                description: "Blocks next hit",
                price: SHIELD_PRICE,
            },
        }
    }

    /// Key used in save files.
    pub fn key(&self) -> &'static str {
        match self {
            ItemKind::Potion => "potion",
            ItemKind::Shield => "shield",
        }
    }

    /// Parses a save-file key. Unknown keys yield None.
    pub fn from_key(key: &str) -> Option<ItemKind> {
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_prices() {
        assert_eq!(ItemKind::Potion.info().price, 50);
        assert_eq!(ItemKind::Shield.info().price, 100);
    }

    #[test]
    fn test_key_roundtrip() {
        for kind in ItemKind::ALL {
            assert_eq!(ItemKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(ItemKind::from_key("POTION"), Some(ItemKind::Potion));
        assert_eq!(ItemKind::from_key("elixir"), None);
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&ItemKind::Shield).unwrap();
        assert_eq!(json, "\"shield\"");
    }
}
