use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use tracing::{info, warn};

use super::prompt::{Prompt, Tone};
use crate::character::{AccountStore, JsonPlayerStore, Player, PlayerStore};
use crate::config::{DevMode, GameConfig};
use crate::error::{GameError, Result};
use crate::leaderboard::Leaderboard;
use crate::questions::QuestionBank;

/// Everything one game session works with. Replaces process-wide state:
/// each menu receives the context explicitly.
pub struct SessionContext {
    pub config: GameConfig,
    pub dev: DevMode,
    pub rng: ChaCha8Rng,
    pub questions: QuestionBank,
    pub players: Box<dyn PlayerStore>,
    pub users: AccountStore,
    pub admins: AccountStore,
    pub leaderboard: Leaderboard,
}

impl SessionContext {
    /// Opens every store under the configured data directory. Stores that
    /// cannot be read start empty.
    pub fn open(config: GameConfig) -> Self {
        if let Err(e) = fs::create_dir_all(config.saves_dir()) {
            warn!(dir = %config.saves_dir().display(), error = %e, "could not create data directory");
        }

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let admins = AccountStore::open_admins(config.admins_path(), &mut rng);
        let questions = QuestionBank::load(config.questions_path());
        let ctx = Self {
            players: Box::new(JsonPlayerStore::new(config.saves_dir())),
            users: AccountStore::open(config.users_path()),
            leaderboard: Leaderboard::open(config.leaderboard_path()),
            dev: DevMode::default(),
            questions,
            admins,
            rng,
            config,
        };
        info!(
            data_dir = %ctx.config.data_dir().display(),
            questions = ctx.questions.len(),
            users = ctx.users.len(),
            "session opened"
        );
        ctx
    }

    /// Shows a recoverable error as a warning. Anything else is handed back
    /// to the caller.
    pub fn report(&self, prompt: &mut dyn Prompt, err: GameError) -> Result<()> {
        if err.is_recoverable() {
            prompt.status(Tone::Warn, &format!("Warning: {}", err));
            Ok(())
        } else {
            Err(err)
        }
    }

    /// Saves `player`, warning instead of failing so play continues in memory.
    pub fn save_player(&self, prompt: &mut dyn Prompt, username: &str, player: &Player) -> bool {
        match self.players.save(username, player) {
            Ok(()) => true,
            Err(e) => {
                prompt.status(Tone::Warn, &format!("Warning: progress not saved: {}", e));
                false
            }
        }
    }

    /// Records `player` on the leaderboard, warning on failure.
    pub fn record_result(&mut self, prompt: &mut dyn Prompt, player: &Player) {
        if let Err(e) = self.leaderboard.record_result(player) {
            warn!(player = %player.name, error = %e, "leaderboard update failed");
            prompt.status(Tone::Warn, &format!("Warning: leaderboard not updated: {}", e));
        }
    }
}
