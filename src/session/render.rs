//! Text rendering of players, enemies, and tables.

use super::prompt::Tone;
use crate::character::Player;
use crate::combat::logic::{CombatEvent, IncorrectOutcome};
use crate::combat::types::Enemy;
use crate::core::progression::experience_required;
use crate::items::ItemEffect;
use crate::leaderboard::LeaderboardEntry;

pub const RULE_WIDTH: usize = 40;

pub fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// `[█████░░░░░] 40/80 HP`
pub fn health_bar(current: u32, maximum: u32, width: usize) -> String {
    let maximum = maximum.max(1);
    let current = current.min(maximum);
    let filled = (width as u64 * current as u64 / maximum as u64) as usize;
    format!(
        "[{}{}] {}/{} HP",
        "█".repeat(filled),
        "░".repeat(width - filled),
        current,
        maximum
    )
}

pub fn xp_progress(player: &Player) -> String {
    let required = experience_required(player.level);
    let percent = player.xp as f64 / required as f64 * 100.0;
    format!("{}/{} ({:.1}%)", player.xp, required, percent)
}

pub fn player_summary(player: &Player) -> Vec<String> {
    vec![
        format!("Level: {} | XP: {}", player.level, xp_progress(player)),
        health_bar(player.hp, player.max_hp, 15),
        format!("Gold: {} | Score: {}", player.gold, player.score),
    ]
}

pub fn battle_status(player: &Player, enemy: &Enemy) -> Vec<String> {
    let mut lines = vec![
        format!("{:^width$}", format!("Battle vs {}", enemy.name), width = RULE_WIDTH),
        rule(),
        player.name.clone(),
        format!("   {}", health_bar(player.hp, player.max_hp, 20)),
        format!(
            "   Damage: {} | Combo: {} | XP: {}",
            player.damage, player.combo, player.xp
        ),
        String::new(),
        enemy.name.clone(),
        format!("   {}", health_bar(enemy.hp, enemy.max_hp, 20)),
        format!("   Damage: {}", enemy.damage),
    ];
    if player.shield_active {
        lines.push(String::new());
        lines.push("Shield is active!".into());
    }
    lines.push(rule());
    lines
}

/// Status line for a combat event. `enemy` names the opponent, if any.
pub fn describe_event(event: &CombatEvent, enemy: &str) -> (Tone, String) {
    match *event {
        CombatEvent::PlayerAttack {
            damage,
            combo,
            score_gained,
        } => (
            Tone::Good,
            format!("Correct! You deal {damage} damage! Score +{score_gained} (combo {combo})"),
        ),
        CombatEvent::WrongAnswer(IncorrectOutcome::Ignored) => (
            Tone::Warn,
            "Wrong answer! Dev mode: no damage taken.".into(),
        ),
        CombatEvent::WrongAnswer(IncorrectOutcome::Blocked) => (
            Tone::Warn,
            "Wrong answer! Your shield blocked the attack!".into(),
        ),
        CombatEvent::WrongAnswer(IncorrectOutcome::Hit { damage }) => (
            Tone::Bad,
            format!("Wrong answer! {enemy} hits you for {damage} damage!"),
        ),
        CombatEvent::ItemUsed {
            kind,
            effect: ItemEffect::Healed(amount),
        } => (Tone::Good, format!("Used {kind}: restored {amount} HP.")),
        CombatEvent::ItemUsed {
            effect: ItemEffect::ShieldRaised,
            ..
        } => (
            Tone::Good,
            "Shield raised! It will block the next hit.".into(),
        ),
        CombatEvent::ItemBought(kind) => (Tone::Good, format!("Purchased {kind}!")),
        CombatEvent::ForfeitCancelled => (Tone::Plain, "The battle continues.".into()),
        CombatEvent::Forfeited => (Tone::Warn, "You forfeited the battle.".into()),
        CombatEvent::InstantWin => (Tone::Good, "Dev mode: instant win!".into()),
        CombatEvent::EnemyDied => (Tone::Good, format!("Victory! You defeated the {enemy}!")),
        CombatEvent::PlayerDied => (
            Tone::Bad,
            format!("Defeat! You were defeated by the {enemy}..."),
        ),
    }
}

pub fn leaderboard_rows(entries: &[LeaderboardEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No scores yet.".into()];
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let name: String = e.name.chars().take(10).collect();
            format!(
                "{:2}. {:<10} | Score: {:<6} | Lv: {:<3} | XP: {}",
                i + 1,
                name,
                e.score,
                e.level,
                e.xp
            )
        })
        .collect()
}
