//! Username/password records with salted SHA-256 hashes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::constants::{
    DEFAULT_ADMIN_NAME, DEFAULT_ADMIN_PASSWORD, PASSWORD_MIN_LEN, SALT_LEN, USERNAME_MAX_LEN,
    USERNAME_MIN_LEN,
};
use crate::error::{GameError, Result};
use crate::utils::persistence::{read_json_lenient, write_json_atomic};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub hash: String,
    pub salt: String,
}

impl Credential {
    pub fn new(password: &str, rng: &mut impl Rng) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rng.fill(&mut salt);
        Self {
            hash: hash_with_salt(&salt, password),
            salt: to_hex(&salt),
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        match from_hex(&self.salt) {
            Some(salt) => hash_with_salt(&salt, password) == self.hash,
            None => false,
        }
    }
}

fn hash_with_salt(salt: &[u8], password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn from_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}

/// 3-20 characters of letters, digits, `_` or `-`.
pub fn username_valid(username: &str) -> bool {
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A JSON file mapping account names to credentials.
pub struct AccountStore {
    path: PathBuf,
    accounts: BTreeMap<String, Credential>,
}

impl AccountStore {
    /// Loads the store, skipping malformed entries. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut accounts = BTreeMap::new();
        if let Some(value) = read_json_lenient(&path) {
            match value.as_object() {
                Some(obj) => {
                    for (name, entry) in obj {
                        match serde_json::from_value::<Credential>(entry.clone()) {
                            Ok(cred) => {
                                accounts.insert(name.clone(), cred);
                            }
                            Err(e) => warn!(account = %name, error = %e, "skipping malformed account"),
                        }
                    }
                }
                None => warn!(path = %path.display(), "account file is not an object, ignoring"),
            }
        }
        Self { path, accounts }
    }

    /// Opens the admin store, creating the default admin account if absent.
    /// The seeded account works in memory even when it cannot be written.
    pub fn open_admins(path: impl Into<PathBuf>, rng: &mut impl Rng) -> Self {
        let mut store = Self::open(path);
        if !store.accounts.contains_key(DEFAULT_ADMIN_NAME) {
            info!("seeding default admin account");
            store.accounts.insert(
                DEFAULT_ADMIN_NAME.to_string(),
                Credential::new(DEFAULT_ADMIN_PASSWORD, rng),
            );
            if let Err(e) = store.save() {
                warn!(error = %e, "could not persist default admin account");
            }
        }
        store
    }

    pub fn save(&self) -> Result<()> {
        write_json_atomic(&self.path, &self.accounts)
    }

    /// The stored spelling of `username`, matched case-insensitively.
    pub fn find(&self, username: &str) -> Option<&str> {
        self.accounts
            .keys()
            .find(|k| k.eq_ignore_ascii_case(username))
            .map(String::as_str)
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Creates an account and persists the store.
    pub fn register(&mut self, username: &str, password: &str, rng: &mut impl Rng) -> Result<String> {
        let username = username.trim();
        if !username_valid(username) {
            return Err(GameError::Input("Invalid username format".into()));
        }
        if self.find(username).is_some() {
            return Err(GameError::Input("Username already exists".into()));
        }
        check_password(password)?;
        self.accounts
            .insert(username.to_string(), Credential::new(password, rng));
        self.save()?;
        info!(username, "account registered");
        Ok(username.to_string())
    }

    /// Returns the stored account name when the password matches.
    pub fn verify(&self, username: &str, password: &str) -> Option<String> {
        let key = self.find(username.trim())?;
        self.accounts
            .get(key)
            .filter(|cred| cred.verify(password))
            .map(|_| key.to_string())
    }

    /// Replaces the password of an existing account and persists the store.
    pub fn reset_password(&mut self, username: &str, new_password: &str, rng: &mut impl Rng) -> Result<String> {
        let key = self
            .find(username.trim())
            .map(str::to_string)
            .ok_or_else(|| GameError::Input("Username not found".into()))?;
        check_password(new_password)?;
        self.accounts
            .insert(key.clone(), Credential::new(new_password, rng));
        self.save()?;
        info!(username = %key, "password reset");
        Ok(key)
    }
}

fn check_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(GameError::Input(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    #[test]
    fn test_username_rules() {
        assert!(username_valid("bob"));
        assert!(username_valid("A_b-9"));
        assert!(!username_valid("ab"));
        assert!(!username_valid("has space"));
        assert!(!username_valid("way_too_long_username_x"));
        assert!(!username_valid("emoji🙂"));
    }

    #[test]
    fn test_credential_verify() {
        let cred = Credential::new("secret", &mut rng());
        assert_eq!(cred.salt.len(), SALT_LEN * 2);
        assert!(cred.verify("secret"));
        assert!(!cred.verify("Secret"));
    }

    #[test]
    fn test_bad_salt_never_verifies() {
        let cred = Credential {
            hash: "00".into(),
            salt: "zz".into(),
        };
        assert!(!cred.verify(""));
    }

    #[test]
    fn test_register_login_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AccountStore::open(dir.path().join("users.json"));
        let mut rng = rng();

        assert_eq!(store.register("Alice", "pass1", &mut rng).unwrap(), "Alice");
        assert_eq!(store.verify("alice", "pass1"), Some("Alice".to_string()));
        assert_eq!(store.verify("alice", "wrong"), None);
        assert!(store.register("ALICE", "pass2", &mut rng).is_err());

        let reopened = AccountStore::open(dir.path().join("users.json"));
        assert_eq!(reopened.len(), 1);
        assert!(reopened.verify("Alice", "pass1").is_some());
    }

    #[test]
    fn test_register_rejects_short_password() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AccountStore::open(dir.path().join("users.json"));
        let err = store.register("bob", "abc", &mut rng()).unwrap_err();
        assert!(matches!(err, GameError::Input(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_reset_password() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = AccountStore::open(dir.path().join("users.json"));
        let mut rng = rng();
        store.register("carol", "old-pass", &mut rng).unwrap();

        assert_eq!(store.reset_password("CAROL", "new-pass", &mut rng).unwrap(), "carol");
        assert!(store.verify("carol", "old-pass").is_none());
        assert!(store.verify("carol", "new-pass").is_some());
        assert!(store.reset_password("nobody", "whatever", &mut rng).is_err());
    }

    #[test]
    fn test_admin_store_seeds_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("admins.json");
        let store = AccountStore::open_admins(&path, &mut rng());
        assert!(store.verify("admin", "admin123").is_some());
        assert!(path.exists());
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, r#"{"good": {"hash": "aa", "salt": "bb"}, "bad": 42}"#).unwrap();
        let store = AccountStore::open(&path);
        assert_eq!(store.usernames().collect::<Vec<_>>(), vec!["good"]);
    }
}
