use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::player::Player;
use crate::error::Result;
use crate::utils::persistence::{read_json_lenient, write_json_atomic};

/// Where player records live between sessions.
pub trait PlayerStore {
    /// Loads `id`'s record. Missing or malformed records come back as a
    /// normalized default player named `id`.
    fn load(&self, id: &str) -> Player;

    fn save(&self, id: &str, player: &Player) -> Result<()>;

    fn exists(&self, id: &str) -> bool;
}

/// One pretty-printed JSON file per account under a saves directory.
pub struct JsonPlayerStore {
    saves_dir: PathBuf,
}

impl JsonPlayerStore {
    pub fn new(saves_dir: impl Into<PathBuf>) -> Self {
        Self {
            saves_dir: saves_dir.into(),
        }
    }

    pub fn saves_dir(&self) -> &Path {
        &self.saves_dir
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.saves_dir.join(format!("{}.json", sanitize_name(id)))
    }
}

impl PlayerStore for JsonPlayerStore {
    fn load(&self, id: &str) -> Player {
        let path = self.path_for(id);
        match read_json_lenient(&path) {
            Some(value) => Player::from_json_value(&value, id),
            None => {
                debug!(id, path = %path.display(), "no save found, starting fresh");
                Player::new(id)
            }
        }
    }

    fn save(&self, id: &str, player: &Player) -> Result<()> {
        let path = self.path_for(id);
        write_json_atomic(&path, player).inspect_err(|e| {
            warn!(id, error = %e, "failed to save player");
        })?;
        debug!(id, level = player.level, gold = player.gold, "player saved");
        Ok(())
    }

    fn exists(&self, id: &str) -> bool {
        self.path_for(id).exists()
    }
}

/// Replaces characters that are unsafe in file names with underscores.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c => c,
        })
        .collect()
}
