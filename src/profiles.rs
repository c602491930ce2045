//! Flat JSON profile store: player name mapped to a best score.
//!
//! The on-disk form is a single pretty-printed document,
//! `{ "Ana": { "score": 50 }, ... }`. Every mutation is a whole-file
//! read-modify-write; a missing or malformed file reads as an empty store
//! and is never a fatal error.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub score: u32,
}

/// Handle to the store file. Constructed once at startup and passed by
/// reference into the orchestrator; the simulation core never touches it.
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: PathBuf) -> Self {
        ProfileStore { path }
    }

    /// Store file next to the executable, falling back to the working
    /// directory.
    pub fn default_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join("players.json");
            }
        }
        PathBuf::from("players.json")
    }

    /// Read the whole mapping. Unreadable or malformed files fail soft to
    /// an empty mapping.
    pub fn read_all(&self) -> BTreeMap<String, Profile> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    fn write_all(&self, players: &BTreeMap<String, Profile>) {
        if let Ok(json) = serde_json::to_string_pretty(players) {
            let _ = fs::write(&self.path, json);
        }
    }

    /// Create a profile with score 0. Fails on an empty (after trimming)
    /// or already-taken name.
    pub fn create(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let mut players = self.read_all();
        if players.contains_key(name) {
            return false;
        }
        players.insert(name.to_string(), Profile { score: 0 });
        self.write_all(&players);
        true
    }

    /// Raise the stored score to `score` if it is higher; lower scores are
    /// ignored, unknown names are a no-op.
    pub fn update_if_higher(&self, name: &str, score: u32) {
        let mut players = self.read_all();
        if let Some(profile) = players.get_mut(name) {
            profile.score = profile.score.max(score);
            self.write_all(&players);
        }
    }

    /// Remove a profile. Returns false (store untouched) if the name does
    /// not exist.
    pub fn delete(&self, name: &str) -> bool {
        let mut players = self.read_all();
        if players.remove(name).is_none() {
            return false;
        }
        self.write_all(&players);
        true
    }

    /// The stored best score for `name`, 0 when absent.
    pub fn high_score(&self, name: &str) -> u32 {
        self.read_all().get(name).map(|p| p.score).unwrap_or(0)
    }
}
