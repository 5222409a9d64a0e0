//! Inventory, shop, and item-use menus. The actual purchase or use is passed
//! in so battles can route it through the battle state machine.

use super::context::SessionContext;
use super::prompt::{Prompt, Tone};
use super::render::{describe_event, health_bar, rule};
use crate::character::Player;
use crate::combat::logic::CombatEvent;
use crate::error::Result;
use crate::items::{usable_items, ItemKind};

pub fn show_inventory(prompt: &mut dyn Prompt, player: &Player) {
    prompt.clear();
    prompt.say("Inventory");
    prompt.say(&rule());
    let items = usable_items(player);
    if items.is_empty() {
        prompt.say("Empty");
    }
    for (kind, count) in items {
        prompt.say(&format!("{}: {} - {}", kind, count, kind.info().description));
    }
    prompt.say(&format!("\nGold: {}", player.gold));
    prompt.say(&rule());
    prompt.pause();
}

fn show_events(prompt: &mut dyn Prompt, events: &[CombatEvent]) {
    for event in events {
        let (tone, text) = describe_event(event, "");
        prompt.status(tone, &text);
    }
}

/// Shop loop. Runs until the player leaves or input ends.
pub fn shop_menu(
    ctx: &SessionContext,
    prompt: &mut dyn Prompt,
    player: &mut Player,
    mut buy: impl FnMut(&mut Player, ItemKind) -> Result<Vec<CombatEvent>>,
) -> Result<()> {
    loop {
        prompt.clear();
        prompt.say("Adventure Shop");
        prompt.say(&rule());
        for (i, kind) in ItemKind::ALL.iter().enumerate() {
            let info = kind.info();
            prompt.say(&format!(
                "{}. {:<15} - {}\n   Price: {} gold",
                i + 1,
                info.name,
                info.description,
                info.price
            ));
        }
        prompt.say("0. Exit Shop");
        prompt.say(&format!("Your Gold: {}", player.gold));

        let Some(choice) = prompt.ask("Enter item number to buy (or 0 to exit): ") else {
            return Ok(());
        };
        if choice == "0" {
            return Ok(());
        }
        let kind = match choice.parse::<usize>() {
            Ok(n) if (1..=ItemKind::ALL.len()).contains(&n) => ItemKind::ALL[n - 1],
            _ => {
                prompt.status(Tone::Warn, "Invalid item number.");
                prompt.pause();
                continue;
            }
        };

        let info = kind.info();
        let question = format!("Buy {} for {} gold? (Y/n): ", info.name, info.price);
        if !prompt.confirm(&question, true) {
            prompt.say("Purchase cancelled.");
        } else {
            match buy(player, kind) {
                Ok(events) => show_events(prompt, &events),
                Err(e) => ctx.report(prompt, e)?,
            }
        }
        prompt.pause();
    }
}

/// Item-use loop. Leaves when nothing usable remains.
pub fn use_item_menu(
    ctx: &SessionContext,
    prompt: &mut dyn Prompt,
    player: &mut Player,
    mut apply: impl FnMut(&mut Player, ItemKind) -> Result<Vec<CombatEvent>>,
) -> Result<()> {
    loop {
        prompt.clear();
        prompt.say("Use Item");
        prompt.say(&rule());
        let items = usable_items(player);
        if items.is_empty() {
            prompt.say("No usable items in inventory.");
            prompt.pause();
            return Ok(());
        }
        for (i, (kind, count)) in items.iter().enumerate() {
            prompt.say(&format!("{}. {} x{} - {}", i + 1, kind, count, kind.info().description));
        }
        prompt.say("0. Back");
        prompt.say(&format!("Current HP: {}", health_bar(player.hp, player.max_hp, 15)));

        let Some(choice) = prompt.ask("Choose item to use: ") else {
            return Ok(());
        };
        if choice == "0" {
            return Ok(());
        }
        match choice.parse::<usize>() {
            Ok(n) if (1..=items.len()).contains(&n) => match apply(player, items[n - 1].0) {
                Ok(events) => show_events(prompt, &events),
                Err(e) => ctx.report(prompt, e)?,
            },
            _ => prompt.status(Tone::Warn, "Invalid item number."),
        }
        prompt.pause();
    }
}
