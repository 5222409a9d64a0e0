//! Interactive battle loop on top of [`Battle`].

use tracing::info;

use super::context::SessionContext;
use super::prompt::{Prompt, Tone};
use super::render::{battle_status, describe_event, health_bar};
use super::shop::{shop_menu, use_item_menu};
use crate::character::Player;
use crate::combat::logic::{Battle, BattleAction, BattleOutcome};
use crate::combat::types::{Enemy, Tier};
use crate::core::progression::{Upgrade, UpgradeChooser};
use crate::error::Result;
use crate::questions::{check_answer, AnswerCheck, Question, QuestionDeck};

/// Asks the player to pick each level-up upgrade. End of input picks max HP.
pub struct PromptChooser<'a> {
    prompt: &'a mut dyn Prompt,
}

impl<'a> PromptChooser<'a> {
    pub fn new(prompt: &'a mut dyn Prompt) -> Self {
        Self { prompt }
    }
}

impl UpgradeChooser for PromptChooser<'_> {
    fn choose(&mut self, player: &Player) -> Upgrade {
        self.prompt.status(
            Tone::Good,
            &format!("LEVEL UP! You reached level {}!", player.level),
        );
        loop {
            for (i, upgrade) in Upgrade::ALL.iter().enumerate() {
                self.prompt.say(&format!("{}. {}", i + 1, upgrade.description()));
            }
            let Some(choice) = self.prompt.ask("Choose your upgrade: ") else {
                return Upgrade::MaxHp;
            };
            match choice.parse::<usize>() {
                Ok(n) if (1..=Upgrade::ALL.len()).contains(&n) => return Upgrade::ALL[n - 1],
                _ => self.prompt.status(Tone::Warn, "Invalid choice."),
            }
        }
    }
}

/// Shows `question` and takes up to `attempts` answers. Running out of
/// attempts or input counts as incorrect.
pub fn ask_question(
    prompt: &mut dyn Prompt,
    question: &Question,
    attempts: u32,
    show_answer: bool,
) -> bool {
    prompt.say(&format!("\n{}", question.question));
    for (i, option) in question.options.iter().enumerate() {
        prompt.say(&format!("   {}. {}", i + 1, option));
    }
    if show_answer {
        prompt.status(
            Tone::Warn,
            &format!("[Answer: {}. {}]", question.answer_index() + 1, question.answer),
        );
    }

    let attempts = attempts.max(1);
    for attempt in 1..=attempts {
        let message = format!("Your answer (attempt {}/{}): ", attempt, attempts);
        let Some(input) = prompt.ask(&message) else {
            return false;
        };
        match check_answer(question, &input) {
            AnswerCheck::Correct => return true,
            AnswerCheck::Incorrect => return false,
            AnswerCheck::Invalid(reason) => prompt.status(Tone::Warn, &reason),
        }
    }
    prompt.status(
        Tone::Warn,
        &format!("Max attempts. The correct answer was: {}", question.answer),
    );
    false
}

/// Fights `enemy` until the battle ends and applies the outcome to `player`.
/// Leaving the prompt (end of input) forfeits.
pub fn run_battle(
    ctx: &mut SessionContext,
    prompt: &mut dyn Prompt,
    player: &mut Player,
    enemy: Enemy,
    tier: Tier,
) -> Result<BattleOutcome> {
    let pool = ctx.questions.pool_for_tier(tier);
    let mut deck = QuestionDeck::new(tier, pool, &mut ctx.rng)?;
    let mut battle = Battle::new(enemy, tier);
    info!(player = %player.name, enemy = %battle.enemy().name, %tier, "battle started");

    while !battle.state().is_terminal() {
        prompt.clear();
        for line in battle_status(player, battle.enemy()) {
            prompt.say(&line);
        }

        let action = if ctx.dev.instant_win {
            BattleAction::InstantWin
        } else {
            prompt.say("[A] Answer question  [I] Use item  [S] Shop  [Q] Forfeit");
            let choice = prompt
                .ask("Choose (or press Enter to answer): ")
                .map(|c| c.to_ascii_lowercase());
            match choice.as_deref() {
                None => BattleAction::Forfeit { confirmed: true },
                Some("i") => {
                    let dev = ctx.dev;
                    use_item_menu(ctx, prompt, player, |p, kind| {
                        battle.step(p, BattleAction::UseItem(kind), &dev)
                    })?;
                    continue;
                }
                Some("s") => {
                    let dev = ctx.dev;
                    shop_menu(ctx, prompt, player, |p, kind| {
                        battle.step(p, BattleAction::BuyItem(kind), &dev)
                    })?;
                    continue;
                }
                Some("q") => BattleAction::Forfeit {
                    confirmed: prompt.confirm("Are you sure you want to forfeit? (y/N): ", false),
                },
                Some("") | Some("a") => {
                    let question = deck.draw(&mut ctx.rng);
                    let correct = ask_question(
                        prompt,
                        question,
                        ctx.config.answer_attempts,
                        ctx.dev.show_answers,
                    );
                    BattleAction::Answer { correct }
                }
                Some(_) => {
                    prompt.status(Tone::Warn, "Invalid choice.");
                    prompt.pause();
                    continue;
                }
            }
        };

        let events = battle.step(player, action, &ctx.dev)?;
        let enemy_name = battle.enemy().name.clone();
        for event in &events {
            let (tone, text) = describe_event(event, &enemy_name);
            prompt.status(tone, &text);
        }
        if !battle.state().is_terminal() {
            prompt.pause();
        }
    }

    let outcome = battle.finish(player, &mut ctx.rng, &mut PromptChooser::new(prompt))?;
    report_outcome(prompt, player, &outcome);
    Ok(outcome)
}

fn report_outcome(prompt: &mut dyn Prompt, player: &Player, outcome: &BattleOutcome) {
    match outcome {
        BattleOutcome::Victory { rewards, .. } => {
            prompt.status(
                Tone::Good,
                &format!("+{} XP | +{} gold", rewards.xp, rewards.gold),
            );
            if rewards.level_gold > 0 || rewards.bonus_gold > 0 {
                prompt.say(&format!(
                    "   (level bonus {}, gold bonus {})",
                    rewards.level_gold, rewards.bonus_gold
                ));
            }
            if let Some(kind) = rewards.item {
                prompt.status(Tone::Good, &format!("Found: {}!", kind));
            }
            for level_up in &rewards.level_ups {
                let mut line = format!(
                    "Level {}: {}",
                    level_up.new_level,
                    level_up.upgrade.description()
                );
                if level_up.hp_restored > 0 {
                    line.push_str(&format!(" (restored {} HP)", level_up.hp_restored));
                }
                prompt.say(&line);
            }
        }
        BattleOutcome::Defeat { penalty, .. } => {
            if penalty.gold_lost > 0 {
                prompt.status(Tone::Bad, &format!("Lost {} gold", penalty.gold_lost));
            }
            if penalty.xp_lost > 0 {
                prompt.status(Tone::Bad, &format!("Lost {} XP", penalty.xp_lost));
            }
            prompt.say(&format!(
                "Recovered to {}",
                health_bar(player.hp, player.max_hp, 15)
            ));
        }
        BattleOutcome::Forfeit => {}
    }
    prompt.pause();
}
