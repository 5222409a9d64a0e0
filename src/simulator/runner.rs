//! Simulation runner driving the real battle state machine with scripted
//! answers.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::config::{SimConfig, UpgradePolicy};
use super::report::SimReport;
use crate::character::Player;
use crate::combat::logic::{Battle, BattleAction, BattleOutcome};
use crate::config::DevMode;
use crate::core::progression::{Upgrade, UpgradeChooser};
use crate::items::{buy_item, use_item, ItemKind};

/// Totals for one simulated player.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub battles: u32,
    pub victories: u32,
    pub defeats: u32,
    /// Battles abandoned after hitting the round limit.
    pub timeouts: u32,
    pub total_rounds: u64,
    pub final_level: u32,
    pub final_gold: u32,
    pub final_score: u64,
    pub items_found: u32,
    pub potions_used: u32,
    pub gold_spent: u32,
}

/// Applies the configured policy, counting level-ups across the run.
struct PolicyChooser {
    policy: UpgradePolicy,
    picks: u32,
}

impl UpgradeChooser for PolicyChooser {
    fn choose(&mut self, player: &Player) -> Upgrade {
        let upgrade = self.policy.pick(player, self.picks);
        self.picks += 1;
        upgrade
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Level {}, Wins {}, Losses {}, Timeouts {}, Gold {}",
                run_idx + 1,
                config.num_runs,
                stats.final_level,
                stats.victories,
                stats.defeats,
                stats.timeouts,
                stats.final_gold
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(config, all_runs)
}

/// Potion upkeep between battles: drink below half health, restock when
/// out of potions and able to afford one.
fn prepare_for_battle(player: &mut Player, stats: &mut RunStats) {
    if player.item_count(ItemKind::Potion) == 0 {
        let price = ItemKind::Potion.info().price;
        if buy_item(player, ItemKind::Potion).is_ok() {
            stats.gold_spent += price;
        }
    }
    while player.hp * 2 < player.max_hp && use_item(player, ItemKind::Potion).is_ok() {
        stats.potions_used += 1;
    }
}

/// One simulated player fighting `battles_per_run` battles in a row.
pub fn simulate_single_run(config: &SimConfig, rng: &mut impl Rng) -> RunStats {
    let mut player = Player::new("Sim");
    let mut stats = RunStats::default();
    let mut chooser = PolicyChooser {
        policy: config.upgrade_policy,
        picks: 0,
    };
    let accuracy = config.clamped_accuracy();
    let dev = DevMode::default();

    for _ in 0..config.battles_per_run {
        if config.use_potions {
            prepare_for_battle(&mut player, &mut stats);
        }

        let mut battle = Battle::start(config.tier, player.level, rng);
        while !battle.state().is_terminal() && battle.rounds() < config.max_rounds_per_battle {
            let correct = rng.gen_bool(accuracy);
            if battle
                .step(&mut player, BattleAction::Answer { correct }, &dev)
                .is_err()
            {
                break;
            }
        }
        if !battle.state().is_terminal() {
            stats.timeouts += 1;
            // Ongoing battles always accept a confirmed forfeit
            let _ = battle.step(&mut player, BattleAction::Forfeit { confirmed: true }, &dev);
        }

        stats.battles += 1;
        stats.total_rounds += battle.rounds() as u64;
        match battle.finish(&mut player, rng, &mut chooser) {
            Ok(BattleOutcome::Victory { rewards, .. }) => {
                stats.victories += 1;
                if rewards.item.is_some() {
                    stats.items_found += 1;
                }
            }
            Ok(BattleOutcome::Defeat { .. }) => stats.defeats += 1,
            Ok(BattleOutcome::Forfeit) => {}
            Err(e) => {
                debug!(error = %e, "simulated battle did not finish");
                break;
            }
        }
    }

    stats.final_level = player.level;
    stats.final_gold = player.gold;
    stats.final_score = player.score;
    stats
}
