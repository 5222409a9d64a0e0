use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::core::constants::{DEFAULT_PLAYER_NAME, STARTING_DAMAGE, STARTING_HP};
use crate::items::ItemKind;
use crate::utils::persistence::as_int;

/// One account's persistent progress.
///
/// Owned exclusively by the session that loaded it. `hp` never exceeds
/// `max_hp`; `level` and `gold_bonus` only ever grow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub xp: u64,
    pub score: u64,
    pub hp: u32,
    pub max_hp: u32,
    pub damage: u32,
    /// Consecutive correct answers.
    pub combo: u32,
    pub gold: u32,
    /// Extra gold granted on every victory, bought with level-up choices.
    pub gold_bonus: u32,
    #[serde(default)]
    pub inventory: BTreeMap<ItemKind, u32>,
    /// Consumed by the next incoming hit.
    #[serde(default)]
    pub shield_active: bool,
}

impl Player {
    pub fn new(name: &str) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() {
                DEFAULT_PLAYER_NAME.to_string()
            } else {
                name.to_string()
            },
            level: 1,
            xp: 0,
            score: 0,
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            damage: STARTING_DAMAGE,
            combo: 0,
            gold: 0,
            gold_bonus: 0,
            inventory: BTreeMap::new(),
            shield_active: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Heals up to `max_hp`, returning the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Restores to `max_hp`, returning the HP actually restored.
    pub fn heal_full(&mut self) -> u32 {
        let before = self.hp;
        self.hp = self.max_hp;
        self.hp.saturating_sub(before)
    }

    pub fn item_count(&self, kind: ItemKind) -> u32 {
        self.inventory.get(&kind).copied().unwrap_or(0)
    }

    /// Builds a player from an arbitrary JSON document, taking the default for
    /// every field that is missing or malformed and clamping the rest into range.
    pub fn from_json_value(value: &Value, fallback_name: &str) -> Self {
        let mut player = Player::new(fallback_name);
        let Some(obj) = value.as_object() else {
            return player;
        };

        if let Some(name) = obj.get("name").and_then(Value::as_str) {
            if !name.trim().is_empty() {
                player.name = name.trim().to_string();
            }
        }

        player.level = clamp_u32(int_field(obj, "level", player.level as i64)).max(1);
        player.xp = int_field(obj, "xp", 0).max(0) as u64;
        player.score = int_field(obj, "score", 0).max(0) as u64;
        player.max_hp = clamp_u32(int_field(obj, "max_hp", player.max_hp as i64)).max(1);
        player.hp = clamp_u32(int_field(obj, "hp", player.hp as i64)).min(player.max_hp);
        player.damage = clamp_u32(int_field(obj, "damage", player.damage as i64)).max(1);
        player.combo = clamp_u32(int_field(obj, "combo", 0));
        player.gold = clamp_u32(int_field(obj, "gold", 0));
        player.gold_bonus = clamp_u32(int_field(obj, "gold_bonus", 0));
        player.shield_active = obj
            .get("shield_active")
            .map(truthy)
            .unwrap_or(false);

        if let Some(inv) = obj.get("inventory").and_then(Value::as_object) {
            for (key, count) in inv {
                if let Some(kind) = ItemKind::from_key(key) {
                    let count = as_int(count).unwrap_or(0);
                    player.inventory.insert(kind, clamp_u32(count));
                }
            }
        }

        player
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER_NAME)
    }
}

fn int_field(obj: &Map<String, Value>, key: &str, default: i64) -> i64 {
    obj.get(key).and_then(as_int).unwrap_or(default)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Null => false,
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}
