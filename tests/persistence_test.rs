//! Integration test: everything that survives between sessions
//!
//! Accounts, player saves, the leaderboard and the question bank, each
//! written by one store and read back by a fresh one.

use quiz_battle::character::{AccountStore, JsonPlayerStore, Player, PlayerStore};
use quiz_battle::combat::Tier;
use quiz_battle::items::{add_item, ItemKind};
use quiz_battle::leaderboard::Leaderboard;
use quiz_battle::questions::{starter_questions, QuestionBank};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use std::fs;

// =========================================================================
// Accounts
// =========================================================================

#[test]
fn test_accounts_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let mut users = AccountStore::open(&path);
    assert_eq!(users.register("Alice", "wonderland", &mut rng).unwrap(), "Alice");

    let users = AccountStore::open(&path);
    assert_eq!(users.verify("alice", "wonderland").as_deref(), Some("Alice"));
    assert_eq!(users.verify("Alice", "Wonderland"), None);

    let raw = fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("wonderland"), "passwords are never stored in clear");
}

#[test]
fn test_password_reset_replaces_old_password() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    let mut users = AccountStore::open(&path);
    users.register("bob", "first", &mut rng).unwrap();
    users.reset_password("BOB", "second", &mut rng).unwrap();

    let users = AccountStore::open(&path);
    assert!(users.verify("bob", "first").is_none());
    assert!(users.verify("bob", "second").is_some());
}

#[test]
fn test_corrupt_account_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("users.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(AccountStore::open(&path).is_empty());
}

#[test]
fn test_admin_store_seeded_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admins.json");
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let first = AccountStore::open_admins(&path, &mut rng);
    let raw = fs::read_to_string(&path).unwrap();
    let second = AccountStore::open_admins(&path, &mut rng);

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(fs::read_to_string(&path).unwrap(), raw, "existing admin left untouched");
}

// =========================================================================
// Player saves
// =========================================================================

#[test]
fn test_player_save_keeps_inventory_and_shield() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonPlayerStore::new(dir.path());

    let mut player = Player::new("carol");
    player.level = 4;
    player.gold = 123;
    player.shield_active = true;
    add_item(&mut player, ItemKind::Potion, 2);
    store.save("carol", &player).unwrap();

    let loaded = JsonPlayerStore::new(dir.path()).load("carol");
    assert_eq!(loaded, player);
}

#[test]
fn test_hand_edited_save_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonPlayerStore::new(dir.path());
    fs::write(
        store.path_for("dave"),
        json!({
            "name": "dave",
            "level": 0,
            "hp": 500,
            "max_hp": 90,
            "gold": "40",
            "inventory": {"potion": 3, "elixir": 9}
        })
        .to_string(),
    )
    .unwrap();

    let player = store.load("dave");
    assert_eq!(player.level, 1);
    assert_eq!(player.hp, 90);
    assert_eq!(player.gold, 40);
    assert_eq!(player.item_count(ItemKind::Potion), 3);
    assert_eq!(player.damage, 8);
}

#[test]
fn test_unsafe_names_stay_inside_saves_dir() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonPlayerStore::new(dir.path());
    let path = store.path_for("../evil");
    assert_eq!(path.parent(), Some(dir.path()));
}

// =========================================================================
// Leaderboard shared between sessions
// =========================================================================

#[test]
fn test_leaderboard_sees_other_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.json");
    let mut first = Leaderboard::open(&path);
    let mut second = Leaderboard::open(&path);

    let mut a = Player::new("a");
    a.score = 300;
    let mut b = Player::new("b");
    b.score = 500;
    first.record_result(&a).unwrap();
    second.record_result(&b).unwrap();

    first.reload();
    let names: Vec<_> = first.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn test_leaderboard_reset_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leaderboard.json");
    let mut board = Leaderboard::open(&path);
    board.record_result(&Player::new("x")).unwrap();
    board.reset().unwrap();

    assert!(Leaderboard::open(&path).entries().is_empty());
}

// =========================================================================
// Question bank
// =========================================================================

#[test]
fn test_missing_question_file_is_seeded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    let bank = QuestionBank::load(&path);

    assert_eq!(bank.questions(), starter_questions().as_slice());
    let reread = QuestionBank::load(&path);
    assert_eq!(reread.len(), bank.len());
}

#[test]
fn test_invalid_records_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    fs::write(
        &path,
        json!([
            {"question": "Good?", "options": ["yes", "no"], "answer": "yes", "difficulty": "hard"},
            {"question": "No answer", "options": ["a", "b"], "answer": "c"},
            {"question": "", "options": ["a", "b"], "answer": "a"},
            "not an object",
            {"question": "Default tier", "options": ["x", "y"], "answer": "y"}
        ])
        .to_string(),
    )
    .unwrap();

    let bank = QuestionBank::load(&path);
    assert_eq!(bank.len(), 2);
    assert_eq!(bank.stats().get(&Tier::Hard), Some(&1));
    assert_eq!(bank.stats().get(&Tier::Medium), Some(&1));
}

#[test]
fn test_all_invalid_file_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    let contents = r#"[{"question": "broken"}]"#;
    fs::write(&path, contents).unwrap();

    let bank = QuestionBank::load(&path);
    assert_eq!(bank.len(), starter_questions().len());
    assert_eq!(fs::read_to_string(&path).unwrap(), contents);
}

#[test]
fn test_samples_cover_every_tier() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("questions.json");
    let mut bank = QuestionBank::load(&path);
    let written = bank.write_samples().unwrap();

    let reloaded = QuestionBank::load(&path);
    assert_eq!(reloaded.len(), written);
    for tier in Tier::ALL {
        assert!(reloaded.stats().get(&tier).copied().unwrap_or(0) > 0, "{tier} has no questions");
    }
}
