//! Global top-10 ranking by score, one entry per player name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::character::Player;
use crate::core::constants::LEADERBOARD_SIZE;
use crate::error::Result;
use crate::utils::persistence::{as_int, read_json_lenient, write_json_atomic};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub xp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl LeaderboardEntry {
    pub fn from_player(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            score: player.score,
            level: player.level,
            xp: player.xp,
            recorded_at: Some(Utc::now()),
        }
    }

    /// Reads an entry written by any version of the game. Numbers may be
    /// strings or floats; negatives clamp to zero and level to at least 1.
    /// Returns None without a name or when a present number is unreadable.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = match obj.get("name")? {
            Value::String(s) if !s.is_empty() => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let number = |key: &str, default: i64| match obj.get(key) {
            None => Some(default),
            Some(v) => as_int(v),
        };
        let score = number("score", 0)?.max(0) as u64;
        let level = number("level", 1)?.clamp(1, u32::MAX as i64) as u32;
        let xp = number("xp", 0)?.max(0) as u64;
        let recorded_at = obj
            .get("recorded_at")
            .and_then(|v| serde_json::from_value(v.clone()).ok());
        Some(Self {
            name,
            score,
            level,
            xp,
            recorded_at,
        })
    }
}

/// Ranking table backed by a JSON file.
///
/// Entries are kept sorted by score, highest first. Recording a player that
/// is already listed replaces the old entry.
pub struct Leaderboard {
    path: PathBuf,
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Loads the table, dropping entries without a name or with bad numbers.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut board = Self {
            path,
            entries: Vec::new(),
        };
        board.reload();
        board
    }

    /// Re-reads the file so results recorded by other sessions are visible.
    pub fn reload(&mut self) {
        let mut entries = Vec::new();
        if let Some(value) = read_json_lenient(&self.path) {
            match value.as_array() {
                Some(items) => {
                    for item in items {
                        match LeaderboardEntry::from_value(item) {
                            Some(entry) => entries.push(entry),
                            None => debug!(?item, "skipping malformed leaderboard entry"),
                        }
                    }
                }
                None => warn!(path = %self.path.display(), "leaderboard file is not a list"),
            }
        }
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(LEADERBOARD_SIZE);
        self.entries = entries;
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    /// Inserts or replaces `player`'s entry and persists the table.
    pub fn record_result(&mut self, player: &Player) -> Result<()> {
        self.reload();
        self.entries.retain(|e| e.name != player.name);
        self.entries.push(LeaderboardEntry::from_player(player));
        // Stable sort keeps earlier entries ahead on equal scores
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(LEADERBOARD_SIZE);
        write_json_atomic(&self.path, &self.entries)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.entries.clear();
        write_json_atomic(&self.path, &self.entries)
    }
}
