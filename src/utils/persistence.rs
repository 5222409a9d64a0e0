//! Generic JSON persistence helpers shared by the player, account and
//! leaderboard stores.

use directories::ProjectDirs;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{GameError, Result};

/// Platform data directory, or `~/.quiz-battle` when the platform has none.
pub fn default_data_dir() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("", "", "quiz-battle") {
        return dirs.data_dir().to_path_buf();
    }
    match dirs::home_dir() {
        Some(home) => home.join(".quiz-battle"),
        None => PathBuf::from(".quiz-battle"),
    }
}

/// Reads a JSON document. A missing or blank file is `Ok(None)`.
pub fn read_json_value(path: &Path) -> Result<Option<Value>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(GameError::persistence(path, e)),
    };
    if content.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&content)?))
}

/// Like [`read_json_value`], but unreadable or corrupt files log a warning and
/// read as missing.
pub fn read_json_lenient(path: &Path) -> Option<Value> {
    match read_json_value(path) {
        Ok(value) => value,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable JSON file");
            None
        }
    }
}

/// Integers, floats (truncated), booleans and numeric strings all count as numbers.
pub fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::Bool(b) => Some(*b as i64),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Writes `data` as pretty-printed JSON, replacing the file atomically.
pub fn write_json_atomic<T: serde::Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| GameError::persistence(dir, e))?;
    }
    let json = serde_json::to_string_pretty(data)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, json).map_err(|e| GameError::persistence(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| GameError::persistence(path, e))?;
    Ok(())
}
