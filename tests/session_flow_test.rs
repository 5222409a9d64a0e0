//! Integration test: scripted sessions through the real menus
//!
//! Drives `session::run` and `run_battle` with a `ScriptedPrompt` against a
//! temporary data directory, then checks what ended up on disk.

use quiz_battle::character::Player;
use quiz_battle::combat::{BattleOutcome, Enemy, Tier};
use quiz_battle::config::GameConfig;
use quiz_battle::items::ItemKind;
use quiz_battle::leaderboard::Leaderboard;
use quiz_battle::session::{self, run_battle, ScriptedPrompt, SessionContext};
use serde_json::json;
use std::fs;
use std::path::Path;

fn open_session(dir: &Path) -> SessionContext {
    let mut config = GameConfig::with_data_dir(dir);
    config.seed = Some(7);
    config.clear_screen = false;
    SessionContext::open(config)
}

/// A bank whose only question is answered correctly by option 2.
fn write_single_question(dir: &Path) {
    let questions = json!([{
        "question": "What is 2 + 2?",
        "options": ["3", "4"],
        "answer": "4",
        "difficulty": "easy"
    }]);
    fs::write(dir.join("questions.json"), questions.to_string()).unwrap();
}

fn weak_slime() -> Enemy {
    Enemy::new("Slime".into(), 20, 6, 10, 25)
}

// =========================================================================
// Full session: admin toggle, registration, battle, logout
// =========================================================================

#[test]
fn test_register_fight_and_logout_persists_everything() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = open_session(dir.path());
    let mut prompt = ScriptedPrompt::new([
        // Admin panel: turn on instant win
        "2", "admin", "admin123", "", "3", "", "8",
        // Register and enter the game
        "1", "2", "alice", "secret", "secret", "",
        // Easy battle, accept the preview, acknowledge rewards, back to menu
        "1", "1", "", "", "3",
        // Save & logout, then quit
        "6", "", "4",
    ]);

    session::run(&mut ctx, &mut prompt).unwrap();

    assert_eq!(prompt.remaining(), 0, "every scripted answer should be used");
    assert!(prompt.saw("Account created for alice"));
    assert!(prompt.saw("Victory! What would you like to do next?"));
    assert!(prompt.saw("Game saved successfully!"));
    assert!(prompt.saw("Thanks for playing Quiz Battle!"));

    // Easy enemy at level 1: 25 gold + 3 for the level, 10 XP
    let saved = ctx.players.load("alice");
    assert_eq!(saved.level, 1);
    assert_eq!(saved.xp, 10);
    assert_eq!(saved.gold, 28);
    assert!(dir.path().join("saves").join("alice.json").exists());

    let board = Leaderboard::open(dir.path().join("leaderboard.json"));
    assert_eq!(board.entries().len(), 1);
    assert_eq!(board.entries()[0].name, "alice");
}

#[test]
fn test_returning_player_logs_in_with_saved_progress() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut ctx = open_session(dir.path());
        let mut prompt = ScriptedPrompt::new(["1", "2", "bob", "hunter2", "hunter2", "", "6", "", "4"]);
        session::run(&mut ctx, &mut prompt).unwrap();
        let mut player = ctx.players.load("bob");
        player.gold = 77;
        ctx.players.save("bob", &player).unwrap();
    }

    let mut ctx = open_session(dir.path());
    let mut prompt = ScriptedPrompt::new(["1", "1", "BOB", "hunter2", "", "6", "", "4"]);
    session::run(&mut ctx, &mut prompt).unwrap();

    assert!(prompt.saw("Logged in as bob"));
    assert!(prompt.saw("Welcome back, bob!"));
    assert!(prompt.saw("Gold: 77 | Score: 0"));
}

#[test]
fn test_wrong_password_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = open_session(dir.path());
    let mut prompt = ScriptedPrompt::new([
        "1", "2", "carol", "pass1", "pass1", "", "6", "",
        "1", "1", "carol", "wrong", "",
        "4",
    ]);
    session::run(&mut ctx, &mut prompt).unwrap();

    assert!(prompt.saw("Invalid credentials."));
    assert_eq!(prompt.remaining(), 0);
}

#[test]
fn test_mismatched_registration_passwords_create_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = open_session(dir.path());
    let mut prompt = ScriptedPrompt::new(["1", "2", "dave", "pass1", "pass2", "", "4"]);
    session::run(&mut ctx, &mut prompt).unwrap();

    assert!(prompt.saw("Passwords do not match."));
    assert!(ctx.users.find("dave").is_none());
    assert!(!ctx.players.exists("dave"));
}

#[test]
fn test_end_of_input_quits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = open_session(dir.path());
    let mut prompt = ScriptedPrompt::new(Vec::<String>::new());
    session::run(&mut ctx, &mut prompt).unwrap();
    assert!(prompt.saw("Thanks for playing"));
}

#[test]
fn test_fresh_data_dir_is_seeded() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = open_session(dir.path());

    assert!(dir.path().join("questions.json").exists());
    assert!(dir.path().join("admins.json").exists());
    assert!(dir.path().join("saves").is_dir());
    assert!(!ctx.questions.is_empty());
    assert!(ctx.admins.verify("admin", "admin123").is_some());
}

// =========================================================================
// Interactive battle loop
// =========================================================================

#[test]
fn test_correct_answers_win_the_battle() {
    let dir = tempfile::tempdir().unwrap();
    write_single_question(dir.path());
    let mut ctx = open_session(dir.path());
    let mut player = Player::new("erin");

    // Damage 8, 9, 10 brings 20 HP to zero on the third answer
    let mut prompt = ScriptedPrompt::new(["", "2", "", "a", "2", "", "", "2", ""]);
    let outcome = run_battle(&mut ctx, &mut prompt, &mut player, weak_slime(), Tier::Easy).unwrap();

    assert!(matches!(outcome, BattleOutcome::Victory { .. }));
    assert_eq!(prompt.remaining(), 0);
    assert_eq!(player.score, 50 + 55 + 60);
    assert_eq!(player.combo, 3);
    assert_eq!(player.hp, player.max_hp);
    assert_eq!(player.gold, 28);
}

#[test]
fn test_invalid_answers_use_up_attempts() {
    let dir = tempfile::tempdir().unwrap();
    write_single_question(dir.path());
    let mut ctx = open_session(dir.path());
    let mut player = Player::new("frank");
    player.combo = 4;

    // Three out-of-range picks count as a wrong answer, then forfeit
    let mut prompt = ScriptedPrompt::new(["", "9", "0", "five", "", "q", "y", ""]);
    let outcome = run_battle(&mut ctx, &mut prompt, &mut player, weak_slime(), Tier::Easy).unwrap();

    assert!(matches!(outcome, BattleOutcome::Forfeit));
    assert!(prompt.saw("Max attempts. The correct answer was: 4"));
    assert_eq!(player.combo, 0);
    assert_eq!(player.hp, player.max_hp - 6);
}

#[test]
fn test_text_answer_matches_option_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("questions.json"),
        json!([{
            "question": "Capital of France?",
            "options": ["Paris", "Lyon"],
            "answer": "Paris",
            "difficulty": "easy"
        }])
        .to_string(),
    )
    .unwrap();
    let mut ctx = open_session(dir.path());
    let mut player = Player::new("gwen");

    let mut prompt = ScriptedPrompt::new(["", "  paris ", "", "q", "y", ""]);
    run_battle(&mut ctx, &mut prompt, &mut player, weak_slime(), Tier::Easy).unwrap();

    assert_eq!(player.combo, 1);
    assert_eq!(player.score, 50);
}

#[test]
fn test_cancelled_forfeit_keeps_fighting() {
    let dir = tempfile::tempdir().unwrap();
    write_single_question(dir.path());
    let mut ctx = open_session(dir.path());
    let mut player = Player::new("hank");

    let mut prompt = ScriptedPrompt::new(["q", "n", "", "q", "yes", ""]);
    let outcome = run_battle(&mut ctx, &mut prompt, &mut player, weak_slime(), Tier::Easy).unwrap();

    assert!(matches!(outcome, BattleOutcome::Forfeit));
    assert_eq!(prompt.remaining(), 0);
    // Forfeit applies no rewards and no penalty
    assert_eq!(player.gold, 0);
    assert_eq!(player.xp, 0);
}

#[test]
fn test_end_of_input_mid_battle_forfeits() {
    let dir = tempfile::tempdir().unwrap();
    write_single_question(dir.path());
    let mut ctx = open_session(dir.path());
    let mut player = Player::new("ivy");

    let mut prompt = ScriptedPrompt::new(Vec::<String>::new());
    let outcome = run_battle(&mut ctx, &mut prompt, &mut player, weak_slime(), Tier::Easy).unwrap();
    assert!(matches!(outcome, BattleOutcome::Forfeit));
}

#[test]
fn test_buying_a_potion_mid_battle() {
    let dir = tempfile::tempdir().unwrap();
    write_single_question(dir.path());
    let mut ctx = open_session(dir.path());
    let mut player = Player::new("jack");
    player.gold = 60;

    // Buy item 1, confirm, acknowledge, leave the shop, then forfeit
    let mut prompt = ScriptedPrompt::new(["s", "1", "", "", "0", "q", "y", ""]);
    run_battle(&mut ctx, &mut prompt, &mut player, weak_slime(), Tier::Easy).unwrap();

    assert_eq!(player.gold, 10);
    assert_eq!(player.item_count(ItemKind::Potion), 1);
    assert_eq!(prompt.remaining(), 0);
}
