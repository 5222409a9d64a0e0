use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty class of a battle and of the questions asked in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    #[default]
    Medium,
    Hard,
    Boss,
}

/// Fixed base stats of a tier before level scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierStats {
    pub family: &'static str,
    pub hp: u32,
    pub damage: u32,
    pub xp: u32,
    pub gold: u32,
    pub drop_chance: f64,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Easy, Tier::Medium, Tier::Hard, Tier::Boss];

    pub fn stats(&self) -> TierStats {
        match self {
            Tier::Easy => TierStats {
                family: "Slime",
                hp: 35,
                damage: 6,
                xp: 10,
                gold: 25,
                drop_chance: 0.15,
            },
            Tier::Medium => TierStats {
                family: "Goblin",
                hp: 60,
                damage: 10,
                xp: 20,
                gold: 40,
                drop_chance: 0.2,
            },
            Tier::Hard => TierStats {
                family: "Orc",
                hp: 90,
                damage: 16,
                xp: 35,
                gold: 65,
                drop_chance: 0.25,
            },
            Tier::Boss => TierStats {
                family: "Dragon",
                hp: 150,
                damage: 25,
                xp: 75,
                gold: 120,
                drop_chance: 0.4,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
            Tier::Boss => "boss",
        }
    }

    /// Lenient parse used for question files: anything unrecognised is medium.
    pub fn parse_or_default(s: &str) -> Tier {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Tier::Easy),
            "medium" => Ok(Tier::Medium),
            "hard" => Ok(Tier::Hard),
            "boss" => Ok(Tier::Boss),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opponent for a single battle. Discarded when the battle ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub damage: u32,
    pub xp_reward: u32,
    pub gold_base: u32,
}

impl Enemy {
    pub fn new(name: String, max_hp: u32, damage: u32, xp_reward: u32, gold_base: u32) -> Self {
        Self {
            name,
            hp: max_hp,
            max_hp,
            damage,
            xp_reward,
            gold_base,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }
}
