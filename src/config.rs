//! Runtime configuration and developer switches.

use std::path::{Path, PathBuf};

use crate::core::constants::ANSWER_ATTEMPTS;
use crate::utils::persistence::default_data_dir;

pub const QUESTIONS_FILE: &str = "questions.json";
pub const USERS_FILE: &str = "users.json";
pub const ADMINS_FILE: &str = "admins.json";
pub const LEADERBOARD_FILE: &str = "leaderboard.json";
pub const SAVES_DIR: &str = "saves";

/// Admin-only switches that bend the rules for testing. All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DevMode {
    /// Incorrect answers never hurt.
    pub god_mode: bool,
    /// Print the correct answer under each question.
    pub show_answers: bool,
    /// Battles end in victory without asking anything.
    pub instant_win: bool,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Directory holding every file the game reads or writes.
    pub data_dir: PathBuf,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub answer_attempts: u32,
    /// Clear the terminal before each menu.
    pub clear_screen: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            seed: None,
            answer_attempts: ANSWER_ATTEMPTS,
            clear_screen: true,
        }
    }
}

impl GameConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn questions_path(&self) -> PathBuf {
        self.data_dir.join(QUESTIONS_FILE)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    pub fn admins_path(&self) -> PathBuf {
        self.data_dir.join(ADMINS_FILE)
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.data_dir.join(LEADERBOARD_FILE)
    }

    pub fn saves_dir(&self) -> PathBuf {
        self.data_dir.join(SAVES_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_live_under_data_dir() {
        let config = GameConfig::with_data_dir("/tmp/qb");
        assert_eq!(config.questions_path(), PathBuf::from("/tmp/qb/questions.json"));
        assert_eq!(config.saves_dir(), PathBuf::from("/tmp/qb/saves"));
        assert_eq!(config.answer_attempts, 3);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_dev_mode_defaults_off() {
        let dev = DevMode::default();
        assert!(!dev.god_mode && !dev.show_answers && !dev.instant_win);
    }
}
