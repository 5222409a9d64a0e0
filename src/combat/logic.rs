use rand::Rng;
use tracing::{debug, info};

use super::enemy::make_enemy;
use super::rewards::{apply_defeat_penalty, apply_victory_rewards, DefeatPenalty, VictoryRewards};
use super::types::{Enemy, Tier};
use crate::character::Player;
use crate::config::DevMode;
use crate::core::constants::{COMBO_BONUS_CAP, SCORE_PER_COMBO, SCORE_PER_CORRECT};
use crate::core::progression::UpgradeChooser;
use crate::error::{GameError, Result};
use crate::items::{buy_item, use_item, ItemEffect, ItemKind};

/// Where a battle stands. Everything but `Ongoing` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    Ongoing,
    Victory,
    Defeat,
    Forfeit,
}

impl BattleState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BattleState::Ongoing)
    }
}

/// One input to the battle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    /// A question was answered (after all attempts were used up if needed).
    Answer { correct: bool },
    UseItem(ItemKind),
    BuyItem(ItemKind),
    /// Leaving needs confirmation; an unconfirmed forfeit changes nothing.
    Forfeit { confirmed: bool },
    /// Dev-mode shortcut that kills the enemy outright.
    InstantWin,
}

/// How an incorrect answer played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncorrectOutcome {
    /// God mode ignored the hit.
    Ignored,
    /// An active shield absorbed the hit and was used up.
    Blocked,
    Hit { damage: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatEvent {
    PlayerAttack {
        damage: u32,
        combo: u32,
        score_gained: u32,
    },
    WrongAnswer(IncorrectOutcome),
    ItemUsed {
        kind: ItemKind,
        effect: ItemEffect,
    },
    ItemBought(ItemKind),
    ForfeitCancelled,
    Forfeited,
    InstantWin,
    EnemyDied,
    PlayerDied,
}

/// Final result handed back once a battle is over. The enemy is only kept for
/// reporting; it no longer takes part in anything.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleOutcome {
    Victory {
        enemy: Enemy,
        rewards: VictoryRewards,
    },
    Defeat {
        enemy: Enemy,
        penalty: DefeatPenalty,
    },
    Forfeit,
}

/// Damage for a correct answer: base damage plus the combo bonus (capped at 10).
pub fn attack_damage(player: &Player) -> u32 {
    player.damage.saturating_add(player.combo.min(COMBO_BONUS_CAP))
}

/// Applies a correct answer: hits the enemy, extends the combo, awards score.
/// Returns (damage dealt, score gained).
pub fn resolve_correct(player: &mut Player, enemy: &mut Enemy) -> (u32, u32) {
    let combo_bonus = player.combo.min(COMBO_BONUS_CAP);
    let damage = attack_damage(player);
    enemy.take_damage(damage);
    player.combo = player.combo.saturating_add(1);
    let score = SCORE_PER_CORRECT + SCORE_PER_COMBO * combo_bonus;
    player.score = player.score.saturating_add(score as u64);
    (damage, score)
}

/// Applies an incorrect answer. The combo always resets, whatever protected
/// the player from the hit.
pub fn resolve_incorrect(player: &mut Player, enemy: &Enemy, god_mode: bool) -> IncorrectOutcome {
    player.combo = 0;
    if god_mode {
        return IncorrectOutcome::Ignored;
    }
    if player.shield_active {
        player.shield_active = false;
        return IncorrectOutcome::Blocked;
    }
    player.take_damage(enemy.damage);
    IncorrectOutcome::Hit {
        damage: enemy.damage,
    }
}

/// Terminal check run after every answered round. The enemy falling takes
/// precedence over the player falling.
pub fn round_result(player: &Player, enemy: &Enemy) -> BattleState {
    if !enemy.is_alive() {
        BattleState::Victory
    } else if !player.is_alive() {
        BattleState::Defeat
    } else {
        BattleState::Ongoing
    }
}

/// A single fight between the player and one enemy.
#[derive(Debug, Clone)]
pub struct Battle {
    enemy: Enemy,
    tier: Tier,
    state: BattleState,
    rounds: u32,
}

impl Battle {
    pub fn new(enemy: Enemy, tier: Tier) -> Self {
        Self {
            enemy,
            tier,
            state: BattleState::Ongoing,
            rounds: 0,
        }
    }

    /// Creates the enemy for `tier` at the player's level and opens the battle.
    pub fn start(tier: Tier, player_level: u32, rng: &mut impl Rng) -> Self {
        Self::new(make_enemy(tier, player_level, rng), tier)
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Questions answered so far.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Feeds one action into the state machine and reports what happened.
    ///
    /// Side actions (items, shop) never end the battle. Answers run a full
    /// round followed by the terminal check.
    pub fn step(
        &mut self,
        player: &mut Player,
        action: BattleAction,
        dev: &DevMode,
    ) -> Result<Vec<CombatEvent>> {
        if self.state.is_terminal() {
            return Err(GameError::BattleOver);
        }
        let mut events = Vec::new();

        match action {
            BattleAction::UseItem(kind) => {
                let effect = use_item(player, kind)?;
                events.push(CombatEvent::ItemUsed { kind, effect });
                return Ok(events);
            }
            BattleAction::BuyItem(kind) => {
                buy_item(player, kind)?;
                events.push(CombatEvent::ItemBought(kind));
                return Ok(events);
            }
            BattleAction::Forfeit { confirmed: false } => {
                events.push(CombatEvent::ForfeitCancelled);
                return Ok(events);
            }
            BattleAction::Forfeit { confirmed: true } => {
                self.state = BattleState::Forfeit;
                info!(player = %player.name, enemy = %self.enemy.name, "battle forfeited");
                events.push(CombatEvent::Forfeited);
                return Ok(events);
            }
            BattleAction::InstantWin => {
                if !dev.instant_win {
                    return Err(GameError::Input("instant win is not enabled".into()));
                }
                self.enemy.hp = 0;
                events.push(CombatEvent::InstantWin);
            }
            BattleAction::Answer { correct: true } => {
                self.rounds += 1;
                let (damage, score_gained) = resolve_correct(player, &mut self.enemy);
                events.push(CombatEvent::PlayerAttack {
                    damage,
                    combo: player.combo,
                    score_gained,
                });
            }
            BattleAction::Answer { correct: false } => {
                self.rounds += 1;
                let outcome = resolve_incorrect(player, &self.enemy, dev.god_mode);
                events.push(CombatEvent::WrongAnswer(outcome));
            }
        }

        self.state = round_result(player, &self.enemy);
        debug!(
            round = self.rounds,
            player_hp = player.hp,
            enemy_hp = self.enemy.hp,
            state = ?self.state,
            "round resolved"
        );
        match self.state {
            BattleState::Victory => events.push(CombatEvent::EnemyDied),
            BattleState::Defeat => events.push(CombatEvent::PlayerDied),
            _ => {}
        }
        Ok(events)
    }

    /// Closes a finished battle, applying victory rewards or the defeat
    /// penalty. A forfeit applies nothing.
    pub fn finish(
        self,
        player: &mut Player,
        rng: &mut impl Rng,
        chooser: &mut impl UpgradeChooser,
    ) -> Result<BattleOutcome> {
        match self.state {
            BattleState::Ongoing => Err(GameError::BattleInProgress),
            BattleState::Victory => {
                let rewards = apply_victory_rewards(player, &self.enemy, self.tier, rng, chooser);
                Ok(BattleOutcome::Victory {
                    enemy: self.enemy,
                    rewards,
                })
            }
            BattleState::Defeat => {
                let penalty = apply_defeat_penalty(player);
                Ok(BattleOutcome::Defeat {
                    enemy: self.enemy,
                    penalty,
                })
            }
            BattleState::Forfeit => Ok(BattleOutcome::Forfeit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::progression::Upgrade;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn goblin() -> Enemy {
        Enemy::new("Goblin".into(), 60, 10, 20, 40)
    }

    fn player_with(damage: u32, combo: u32) -> Player {
        let mut player = Player::new("Hero");
        player.damage = damage;
        player.combo = combo;
        player
    }

    #[test]
    fn test_damage_with_combo_below_cap() {
        let mut player = player_with(8, 3);
        let mut enemy = goblin();
        let (damage, score) = resolve_correct(&mut player, &mut enemy);
        assert_eq!(damage, 11);
        assert_eq!(enemy.hp, 49);
        assert_eq!(player.combo, 4);
        assert_eq!(score, 65);
        assert_eq!(player.score, 65);
    }

    #[test]
    fn test_damage_combo_capped() {
        let mut player = player_with(8, 15);
        let mut enemy = goblin();
        let (damage, score) = resolve_correct(&mut player, &mut enemy);
        assert_eq!(damage, 18);
        assert_eq!(score, 100);
        assert_eq!(player.combo, 16);
    }

    #[test]
    fn test_enemy_hp_floors_at_zero() {
        let mut player = player_with(100, 0);
        let mut enemy = goblin();
        resolve_correct(&mut player, &mut enemy);
        assert_eq!(enemy.hp, 0);
    }

    #[test]
    fn test_incorrect_with_shield_blocks() {
        let mut player = player_with(8, 5);
        player.shield_active = true;
        let outcome = resolve_incorrect(&mut player, &goblin(), false);
        assert_eq!(outcome, IncorrectOutcome::Blocked);
        assert_eq!(player.hp, 80);
        assert!(!player.shield_active);
        assert_eq!(player.combo, 0);
    }

    #[test]
    fn test_incorrect_without_shield_hits() {
        let mut player = player_with(8, 5);
        let outcome = resolve_incorrect(&mut player, &goblin(), false);
        assert_eq!(outcome, IncorrectOutcome::Hit { damage: 10 });
        assert_eq!(player.hp, 70);
        assert_eq!(player.combo, 0);
    }

    #[test]
    fn test_god_mode_ignores_hit_and_keeps_shield() {
        let mut player = player_with(8, 5);
        player.shield_active = true;
        let outcome = resolve_incorrect(&mut player, &goblin(), true);
        assert_eq!(outcome, IncorrectOutcome::Ignored);
        assert_eq!(player.hp, 80);
        assert!(player.shield_active);
        assert_eq!(player.combo, 0);
    }

    #[test]
    fn test_battle_reaches_victory() {
        let mut player = player_with(30, 0);
        let mut battle = Battle::new(goblin(), Tier::Medium);
        let dev = DevMode::default();

        battle.step(&mut player, BattleAction::Answer { correct: true }, &dev).unwrap();
        battle.step(&mut player, BattleAction::Answer { correct: true }, &dev).unwrap();
        assert_eq!(battle.state(), BattleState::Ongoing);
        let events = battle
            .step(&mut player, BattleAction::Answer { correct: true }, &dev)
            .unwrap();

        assert_eq!(battle.state(), BattleState::Victory);
        assert_eq!(battle.rounds(), 3);
        assert!(matches!(events.last(), Some(CombatEvent::EnemyDied)));
    }

    #[test]
    fn test_battle_reaches_defeat() {
        let mut player = player_with(1, 0);
        player.hp = 15;
        let mut battle = Battle::new(goblin(), Tier::Medium);
        let dev = DevMode::default();

        battle.step(&mut player, BattleAction::Answer { correct: false }, &dev).unwrap();
        assert_eq!(player.hp, 5);
        battle.step(&mut player, BattleAction::Answer { correct: false }, &dev).unwrap();
        assert_eq!(player.hp, 0);
        assert_eq!(battle.state(), BattleState::Defeat);
    }

    #[test]
    fn test_steps_after_end_are_rejected() {
        let mut player = player_with(100, 0);
        let mut battle = Battle::new(goblin(), Tier::Medium);
        let dev = DevMode::default();
        battle.step(&mut player, BattleAction::Answer { correct: true }, &dev).unwrap();

        let err = battle
            .step(&mut player, BattleAction::Answer { correct: true }, &dev)
            .unwrap_err();
        assert!(matches!(err, GameError::BattleOver));
    }

    #[test]
    fn test_unconfirmed_forfeit_is_noop() {
        let mut player = Player::new("Hero");
        let mut battle = Battle::new(goblin(), Tier::Medium);
        let events = battle
            .step(&mut player, BattleAction::Forfeit { confirmed: false }, &DevMode::default())
            .unwrap();
        assert!(matches!(events[..], [CombatEvent::ForfeitCancelled]));
        assert_eq!(battle.state(), BattleState::Ongoing);
    }

    #[test]
    fn test_forfeit_applies_nothing() {
        let mut player = Player::new("Hero");
        player.gold = 100;
        player.xp = 90;
        player.hp = 33;
        let before = player.clone();

        let mut battle = Battle::new(goblin(), Tier::Medium);
        battle
            .step(&mut player, BattleAction::Forfeit { confirmed: true }, &DevMode::default())
            .unwrap();
        assert_eq!(battle.state(), BattleState::Forfeit);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = battle
            .finish(&mut player, &mut rng, &mut |_: &Player| Upgrade::Damage)
            .unwrap();
        assert_eq!(outcome, BattleOutcome::Forfeit);
        assert_eq!(player, before);
    }

    #[test]
    fn test_instant_win_requires_dev_flag() {
        let mut player = Player::new("Hero");
        let mut battle = Battle::new(goblin(), Tier::Medium);
        assert!(battle
            .step(&mut player, BattleAction::InstantWin, &DevMode::default())
            .is_err());
        assert_eq!(battle.state(), BattleState::Ongoing);

        let dev = DevMode {
            instant_win: true,
            ..DevMode::default()
        };
        battle.step(&mut player, BattleAction::InstantWin, &dev).unwrap();
        assert_eq!(battle.state(), BattleState::Victory);
        assert_eq!(battle.enemy().hp, 0);
    }

    #[test]
    fn test_side_actions_do_not_count_as_rounds() {
        let mut player = Player::new("Hero");
        player.gold = 500;
        player.hp = 40;
        let mut battle = Battle::new(goblin(), Tier::Medium);
        let dev = DevMode::default();

        battle.step(&mut player, BattleAction::BuyItem(ItemKind::Potion), &dev).unwrap();
        battle.step(&mut player, BattleAction::UseItem(ItemKind::Potion), &dev).unwrap();
        assert_eq!(player.hp, 70);
        assert_eq!(player.gold, 450);
        assert_eq!(battle.rounds(), 0);
        assert!(battle
            .step(&mut player, BattleAction::UseItem(ItemKind::Shield), &dev)
            .is_err());
        assert_eq!(battle.state(), BattleState::Ongoing);
    }

    #[test]
    fn test_finish_ongoing_is_error() {
        let mut player = Player::new("Hero");
        let battle = Battle::new(goblin(), Tier::Medium);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = battle
            .finish(&mut player, &mut rng, &mut |_: &Player| Upgrade::Damage)
            .unwrap_err();
        assert!(matches!(err, GameError::BattleInProgress));
    }

    #[test]
    fn test_finish_defeat_applies_penalty() {
        let mut player = Player::new("Hero");
        player.gold = 100;
        player.xp = 90;
        player.hp = 10;
        let mut battle = Battle::new(goblin(), Tier::Medium);
        battle
            .step(&mut player, BattleAction::Answer { correct: false }, &DevMode::default())
            .unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = battle
            .finish(&mut player, &mut rng, &mut |_: &Player| Upgrade::Damage)
            .unwrap();
        match outcome {
            BattleOutcome::Defeat { penalty, .. } => {
                assert_eq!(penalty.gold_lost, 25);
                assert_eq!(penalty.xp_lost, 30);
            }
            other => panic!("expected defeat, got {other:?}"),
        }
        assert_eq!(player.hp, 20);
    }

    #[test]
    fn test_huge_damage_and_combo_saturate() {
        let mut player = player_with(u32::MAX, u32::MAX);
        let mut enemy = goblin();
        let (damage, _) = resolve_correct(&mut player, &mut enemy);
        assert_eq!(damage, u32::MAX);
        assert_eq!(player.combo, u32::MAX);
        assert!(!enemy.is_alive());
    }
}
