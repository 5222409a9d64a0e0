//! Simulation configuration.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::character::Player;
use crate::combat::types::Tier;
use crate::core::progression::Upgrade;

/// How the scripted player spends level-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradePolicy {
    MaxHp,
    Damage,
    GoldBonus,
    /// Cycles max HP, damage, gold bonus.
    #[default]
    Balanced,
    /// Max HP while below half health, damage otherwise.
    Adaptive,
}

impl UpgradePolicy {
    /// Upgrade for the `nth` level-up of a run (0-based).
    pub fn pick(&self, player: &Player, nth: u32) -> Upgrade {
        match self {
            UpgradePolicy::MaxHp => Upgrade::MaxHp,
            UpgradePolicy::Damage => Upgrade::Damage,
            UpgradePolicy::GoldBonus => Upgrade::GoldBonus,
            UpgradePolicy::Balanced => Upgrade::ALL[nth as usize % Upgrade::ALL.len()],
            UpgradePolicy::Adaptive => {
                if player.hp * 2 < player.max_hp {
                    Upgrade::MaxHp
                } else {
                    Upgrade::Damage
                }
            }
        }
    }
}

impl FromStr for UpgradePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "max_hp" | "hp" => Ok(UpgradePolicy::MaxHp),
            "damage" => Ok(UpgradePolicy::Damage),
            "gold_bonus" | "gold" => Ok(UpgradePolicy::GoldBonus),
            "balanced" => Ok(UpgradePolicy::Balanced),
            "adaptive" => Ok(UpgradePolicy::Adaptive),
            other => Err(format!("unknown upgrade policy '{}'", other)),
        }
    }
}

impl fmt::Display for UpgradePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UpgradePolicy::MaxHp => "max-hp",
            UpgradePolicy::Damage => "damage",
            UpgradePolicy::GoldBonus => "gold-bonus",
            UpgradePolicy::Balanced => "balanced",
            UpgradePolicy::Adaptive => "adaptive",
        };
        f.write_str(name)
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated players
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Chance that a scripted answer is correct, 0.0 to 1.0
    pub accuracy: f64,

    /// Tier every battle is fought at
    pub tier: Tier,

    pub upgrade_policy: UpgradePolicy,

    /// Battles each simulated player fights
    pub battles_per_run: u32,

    /// Rounds after which a battle is abandoned as a forfeit
    pub max_rounds_per_battle: u32,

    /// Buy and drink potions between battles when below half health
    pub use_potions: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            accuracy: 0.75,
            tier: Tier::Medium,
            upgrade_policy: UpgradePolicy::default(),
            battles_per_run: 50,
            max_rounds_per_battle: 500,
            use_potions: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for comparing tiers at a fixed accuracy
    pub fn tier_test(tier: Tier, accuracy: f64) -> Self {
        Self {
            num_runs: 100,
            tier,
            accuracy,
            ..Default::default()
        }
    }

    /// Accuracy as a valid probability.
    pub fn clamped_accuracy(&self) -> f64 {
        if self.accuracy.is_nan() {
            0.0
        } else {
            self.accuracy.clamp(0.0, 1.0)
        }
    }
}
