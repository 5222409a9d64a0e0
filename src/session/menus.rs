//! Menu flows from the title screen down to battle selection.

use tracing::{debug, info};

use super::battle::run_battle;
use super::context::SessionContext;
use super::prompt::{Prompt, Tone};
use super::render::{health_bar, leaderboard_rows, player_summary, rule};
use super::shop::{shop_menu, show_inventory, use_item_menu};
use crate::character::Player;
use crate::combat::enemy::make_enemy;
use crate::combat::logic::{BattleOutcome, CombatEvent};
use crate::combat::types::Tier;
use crate::error::Result;
use crate::items::{buy_item, use_item};
use crate::questions::QuestionBank;
use crate::utils::build_info::version_string;

/// Title screen loop. Returns when the player quits or input ends.
pub fn run(ctx: &mut SessionContext, prompt: &mut dyn Prompt) -> Result<()> {
    prompt.say(&format!("Game ready with {} questions!", ctx.questions.len()));
    loop {
        prompt.clear();
        prompt.say(&rule());
        prompt.say(&format!("{:^40}", "Quiz Battle"));
        prompt.say(&format!("{:^40}", version_string()));
        prompt.say(&rule());
        prompt.say("Test your knowledge in epic battles!\n");
        prompt.say("1. Play Game (Login/Register)");
        prompt.say("2. Admin Panel");
        prompt.say("3. View Leaderboard");
        prompt.say("4. Quit Game");

        match prompt.ask("Choose your adventure: ").as_deref() {
            None | Some("4") => {
                prompt.say("Thanks for playing Quiz Battle! See you next time!");
                return Ok(());
            }
            Some("1") => {
                if let Some(username) = player_access(ctx, prompt)? {
                    play(ctx, prompt, &username)?;
                }
            }
            Some("2") => {
                if admin_login(ctx, prompt) {
                    admin_menu(ctx, prompt)?;
                }
            }
            Some("3") => show_leaderboard(ctx, prompt),
            Some(_) => {
                prompt.status(Tone::Warn, "Invalid choice.");
                prompt.pause();
            }
        }
    }
}

/// Login, registration, or password reset. Returns the account name to play as.
pub fn player_access(ctx: &mut SessionContext, prompt: &mut dyn Prompt) -> Result<Option<String>> {
    prompt.clear();
    prompt.say("Player Access");
    prompt.say(&rule());
    prompt.say("1. Login to existing account");
    prompt.say("2. Create new account");
    prompt.say("3. Reset forgotten password");
    prompt.say("4. Back to main menu");

    let username = match prompt.ask("Choose: ").as_deref() {
        Some("1") => login(ctx, prompt),
        Some("2") => register(ctx, prompt)?,
        Some("3") => reset_password(ctx, prompt)?,
        Some("4") | None => return Ok(None),
        Some(_) => {
            prompt.status(Tone::Warn, "Invalid choice.");
            None
        }
    };
    if username.is_none() {
        prompt.pause();
    }
    Ok(username)
}

fn read_credentials(prompt: &mut dyn Prompt, role: &str) -> Option<(String, String)> {
    let username = prompt.ask(&format!("{} username: ", role))?;
    let password = prompt.ask("Password: ")?;
    if username.is_empty() || password.is_empty() {
        prompt.status(Tone::Warn, "Username and password cannot be empty.");
        return None;
    }
    Some((username, password))
}

fn login(ctx: &SessionContext, prompt: &mut dyn Prompt) -> Option<String> {
    let (username, password) = read_credentials(prompt, "User")?;
    match ctx.users.verify(&username, &password) {
        Some(account) => {
            prompt.status(Tone::Good, &format!("Logged in as {}", account));
            info!(username = %account, "login");
            Some(account)
        }
        None => {
            prompt.status(Tone::Warn, "Invalid credentials.");
            None
        }
    }
}

fn register(ctx: &mut SessionContext, prompt: &mut dyn Prompt) -> Result<Option<String>> {
    let Some(username) =
        prompt.ask("Choose a username (3-20 chars, letters/numbers/_/- only): ")
    else {
        return Ok(None);
    };
    let Some(password) = prompt.ask("Choose a password (minimum 4 characters): ") else {
        return Ok(None);
    };
    let Some(confirm) = prompt.ask("Confirm password: ") else {
        return Ok(None);
    };
    if password != confirm {
        prompt.status(Tone::Warn, "Passwords do not match.");
        return Ok(None);
    }
    if ctx.users.find(&username).is_none() && ctx.players.exists(&username) {
        prompt.status(
            Tone::Warn,
            "Save file collision detected. Choose a different username.",
        );
        return Ok(None);
    }

    let account = match ctx.users.register(&username, &password, &mut ctx.rng) {
        Ok(account) => account,
        Err(e) => {
            ctx.report(prompt, e)?;
            return Ok(None);
        }
    };
    ctx.save_player(prompt, &account, &Player::new(&account));
    prompt.status(Tone::Good, &format!("Account created for {}", account));
    Ok(Some(account))
}

fn reset_password(ctx: &mut SessionContext, prompt: &mut dyn Prompt) -> Result<Option<String>> {
    let Some(username) = prompt.ask("Enter your username: ") else {
        return Ok(None);
    };
    if ctx.users.find(&username).is_none() {
        prompt.status(Tone::Warn, "Username not found.");
        return Ok(None);
    }
    let Some(password) = prompt.ask("Enter a NEW password (minimum 4 characters): ") else {
        return Ok(None);
    };
    let Some(confirm) = prompt.ask("Confirm NEW password: ") else {
        return Ok(None);
    };
    if password != confirm {
        prompt.status(Tone::Warn, "Passwords do not match.");
        return Ok(None);
    }
    match ctx.users.reset_password(&username, &password, &mut ctx.rng) {
        Ok(account) => {
            prompt.status(Tone::Good, "Password reset successful!");
            Ok(Some(account))
        }
        Err(e) => {
            ctx.report(prompt, e)?;
            Ok(None)
        }
    }
}

/// Game menu for a logged-in player. Saves on the way out.
pub fn play(ctx: &mut SessionContext, prompt: &mut dyn Prompt, username: &str) -> Result<()> {
    let mut player = ctx.players.load(username);
    prompt.pause();

    loop {
        prompt.clear();
        prompt.say(&rule());
        prompt.say(&format!("  Welcome back, {}!", player.name));
        prompt.say(&rule());
        for line in player_summary(&player) {
            prompt.say(&format!("   {}", line));
        }
        prompt.say("\nGame Menu:");
        prompt.say("1. Battle Enemies");
        prompt.say("2. View Leaderboard");
        prompt.say("3. Check Inventory");
        prompt.say("4. Visit Shop");
        prompt.say("5. Use Item");
        prompt.say("6. Save & Logout");

        match prompt.ask("Choose your action: ").as_deref() {
            Some("1") => battle_menu(ctx, prompt, &mut player, username)?,
            Some("2") => show_leaderboard(ctx, prompt),
            Some("3") => show_inventory(prompt, &player),
            Some("4") => {
                shop_menu(ctx, prompt, &mut player, |p, kind| {
                    buy_item(p, kind).map(|()| vec![CombatEvent::ItemBought(kind)])
                })?;
                ctx.save_player(prompt, username, &player);
            }
            Some("5") => {
                use_item_menu(ctx, prompt, &mut player, |p, kind| {
                    use_item(p, kind).map(|effect| vec![CombatEvent::ItemUsed { kind, effect }])
                })?;
                ctx.save_player(prompt, username, &player);
            }
            Some("6") | None => {
                prompt.say("Saving your progress...");
                if ctx.save_player(prompt, username, &player) {
                    ctx.record_result(prompt, &player);
                    prompt.status(Tone::Good, "Game saved successfully!");
                }
                info!(username, level = player.level, score = player.score, "logout");
                prompt.say("See you next time!");
                prompt.pause();
                return Ok(());
            }
            Some(_) => {
                prompt.status(Tone::Warn, "Invalid choice.");
                prompt.pause();
            }
        }
    }
}

fn choose_tier(prompt: &mut dyn Prompt, player: &Player) -> Option<Tier> {
    loop {
        prompt.clear();
        prompt.say("Choose Your Battle!");
        prompt.say(&rule());
        for (i, tier) in Tier::ALL.iter().enumerate() {
            prompt.say(&format!(
                "{}. {:<7} Battle ({}s)",
                i + 1,
                capitalize(tier.as_str()),
                tier.stats().family
            ));
        }
        prompt.say("5. Return to Game Menu");
        prompt.say(&format!(
            "\nYour Stats: Lv.{} | {}",
            player.level,
            health_bar(player.hp, player.max_hp, 12)
        ));

        match prompt.ask("Choose your challenge: ")?.as_str() {
            "5" => return None,
            choice => match choice.parse::<usize>() {
                Ok(n) if (1..=Tier::ALL.len()).contains(&n) => return Some(Tier::ALL[n - 1]),
                _ => {
                    prompt.status(Tone::Warn, "Invalid choice.");
                    prompt.pause();
                }
            },
        }
    }
}

/// Tier selection, enemy preview, and the battles themselves. The player is
/// saved and ranked after every battle.
pub fn battle_menu(
    ctx: &mut SessionContext,
    prompt: &mut dyn Prompt,
    player: &mut Player,
    username: &str,
) -> Result<()> {
    'tiers: while let Some(tier) = choose_tier(prompt, player) {
        loop {
            if !player.is_alive() {
                prompt.status(Tone::Warn, "You need to heal before battling!");
                prompt.pause();
                continue 'tiers;
            }

            let enemy = make_enemy(tier, player.level, &mut ctx.rng);
            prompt.say(&format!(
                "\nPreparing {} battle against {}...",
                capitalize(tier.as_str()),
                enemy.name
            ));
            prompt.say(&format!(
                "Enemy: {} | Damage: {}",
                health_bar(enemy.hp, enemy.max_hp, 12),
                enemy.damage
            ));
            if !prompt.confirm("Ready to fight? (Y/n): ", true) {
                prompt.say("Battle cancelled.");
                prompt.pause();
                continue 'tiers;
            }

            let outcome = match run_battle(ctx, prompt, player, enemy, tier) {
                Ok(outcome) => outcome,
                Err(e) => {
                    ctx.report(prompt, e)?;
                    prompt.pause();
                    continue 'tiers;
                }
            };
            ctx.save_player(prompt, username, player);
            ctx.record_result(prompt, player);

            match outcome {
                BattleOutcome::Victory { .. } if tier == Tier::Boss => {
                    prompt.status(
                        Tone::Good,
                        "Congratulations! You've defeated a mighty boss!",
                    );
                    prompt.pause();
                    return Ok(());
                }
                BattleOutcome::Victory { .. } => loop {
                    prompt.say("\nVictory! What would you like to do next?");
                    prompt.say("1. Fight another enemy (same difficulty)");
                    prompt.say("2. Choose different difficulty");
                    prompt.say("3. Return to game menu");
                    match prompt.ask("Choose: ").as_deref() {
                        Some("1") => break,
                        Some("2") => continue 'tiers,
                        Some("3") | None => return Ok(()),
                        Some(_) => prompt.status(Tone::Warn, "Invalid choice."),
                    }
                },
                BattleOutcome::Defeat { .. } | BattleOutcome::Forfeit => {
                    prompt.say("Perhaps try an easier difficulty or heal up first...");
                    prompt.pause();
                    return Ok(());
                }
            }
        }
    }
    Ok(())
}

pub fn show_leaderboard(ctx: &mut SessionContext, prompt: &mut dyn Prompt) {
    ctx.leaderboard.reload();
    prompt.clear();
    prompt.say("Leaderboard");
    prompt.say(&rule());
    for row in leaderboard_rows(ctx.leaderboard.entries()) {
        prompt.say(&row);
    }
    prompt.say(&rule());
    prompt.pause();
}

fn admin_login(ctx: &SessionContext, prompt: &mut dyn Prompt) -> bool {
    prompt.clear();
    prompt.say("Admin Access Required");
    let Some((username, password)) = read_credentials(prompt, "Admin") else {
        prompt.pause();
        return false;
    };
    let ok = ctx.admins.verify(&username, &password).is_some();
    if ok {
        prompt.status(Tone::Good, "Admin logged in.");
        info!(username = %username, "admin login");
    } else {
        prompt.status(Tone::Warn, "Invalid credentials.");
    }
    prompt.pause();
    ok
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

pub fn admin_menu(ctx: &mut SessionContext, prompt: &mut dyn Prompt) -> Result<()> {
    loop {
        prompt.clear();
        prompt.say("Dev/Admin Menu");
        prompt.say(&rule());
        prompt.say(&format!("1. God Mode:     {}", on_off(ctx.dev.god_mode)));
        prompt.say(&format!("2. Show Answers: {}", on_off(ctx.dev.show_answers)));
        prompt.say(&format!("3. Instant Win:  {}", on_off(ctx.dev.instant_win)));
        prompt.say("4. View All Users");
        prompt.say("5. Reset Leaderboard");
        prompt.say("6. Create Sample Questions");
        prompt.say("7. View Questions Statistics");
        prompt.say("8. Back to Main Menu");

        match prompt.ask("Choose: ").as_deref() {
            Some("1") => {
                ctx.dev.god_mode = !ctx.dev.god_mode;
                prompt.say("God Mode toggled.");
            }
            Some("2") => {
                ctx.dev.show_answers = !ctx.dev.show_answers;
                prompt.say("Show Answers toggled.");
            }
            Some("3") => {
                ctx.dev.instant_win = !ctx.dev.instant_win;
                prompt.say("Instant Win toggled.");
            }
            Some("4") => list_users(ctx, prompt),
            Some("5") => {
                if prompt.confirm("Reset leaderboard? (y/N): ", false) {
                    match ctx.leaderboard.reset() {
                        Ok(()) => prompt.status(Tone::Good, "Leaderboard reset."),
                        Err(e) => ctx.report(prompt, e)?,
                    }
                } else {
                    prompt.say("Reset cancelled.");
                }
            }
            Some("6") => match ctx.questions.write_samples() {
                Ok(count) => prompt.status(
                    Tone::Good,
                    &format!(
                        "Created {} with {} sample questions.",
                        ctx.questions.path().display(),
                        count
                    ),
                ),
                Err(e) => ctx.report(prompt, e)?,
            },
            Some("7") => show_question_stats(ctx, prompt),
            Some("8") | None => return Ok(()),
            Some(_) => prompt.status(Tone::Warn, "Invalid choice."),
        }
        debug!(dev = ?ctx.dev, "admin menu action");
        prompt.pause();
    }
}

fn list_users(ctx: &SessionContext, prompt: &mut dyn Prompt) {
    prompt.clear();
    prompt.say("Registered Users:");
    prompt.say(&rule());
    if ctx.users.is_empty() {
        prompt.say("No users registered.");
    }
    for (i, name) in ctx.users.usernames().enumerate() {
        let player = ctx.players.load(name);
        prompt.say(&format!(
            "{:2}. {:<15} | Lv: {:<2} | Score: {}",
            i + 1,
            name,
            player.level,
            player.score
        ));
    }
}

fn show_question_stats(ctx: &mut SessionContext, prompt: &mut dyn Prompt) {
    ctx.questions = QuestionBank::load(ctx.questions.path().to_path_buf());
    prompt.clear();
    prompt.say("Question Statistics");
    prompt.say(&rule());
    prompt.say(&format!("Total Questions: {}", ctx.questions.len()));
    prompt.say("By Difficulty:");
    for (tier, count) in ctx.questions.stats() {
        prompt.say(&format!("  {}: {}", capitalize(tier.as_str()), count));
    }
    prompt.say(&format!("\nFile: {}", ctx.questions.path().display()));
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
