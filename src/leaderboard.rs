#![warn(clippy::all, clippy::pedantic)]

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::game::ANONYMOUS_PLAYER;

// Environment variable that overrides the score file location
pub const SCORES_ENV_VAR: &str = "CHICK_STACK_SCORES";

// Fallback score file when no data directory is available
const SCORES_FILE_PATH: &str = "data/chick_stack_scores.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
    // Unix seconds
    #[serde(default)]
    pub recorded_at: u64,
}

impl ScoreEntry {
    /// A new entry stamped with the current time
    #[must_use]
    pub fn new(name: &str, score: u32) -> Self {
        let recorded_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            name: normalize_name(name),
            score,
            recorded_at,
        }
    }
}

/// Trimmed player name, or the anonymous placeholder when nothing is left
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        ANONYMOUS_PLAYER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Remote-store stand-in: create an entry, list the best ones
pub trait ScoreStore {
    fn submit(&mut self, entry: ScoreEntry) -> Result<(), StoreError>;
    fn top(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError>;
}

/// Entries ranked by score, highest first. Ties keep submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default)]
    pub scores: Vec<ScoreEntry>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert keeping the ranking; returns the 1-based rank
    pub fn insert(&mut self, entry: ScoreEntry) -> usize {
        let pos = self
            .scores
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.scores.len());
        self.scores.insert(pos, entry);
        pos + 1
    }

    #[must_use]
    pub fn top(&self, limit: usize) -> Vec<ScoreEntry> {
        self.scores.iter().take(limit).cloned().collect()
    }

    /// Rank (1-based) and score of the player's first entry in `entries`
    #[must_use]
    pub fn player_best(entries: &[ScoreEntry], name: &str) -> Option<(usize, u32)> {
        let name = normalize_name(name);
        entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| (i + 1, entries[i].score))
    }

    fn sort(&mut self) {
        // Stable, so equal scores keep submission order
        self.scores.sort_by(|a, b| b.score.cmp(&a.score));
    }
}

/// In-process store, used when no score file can be written and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    board: Leaderboard,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn submit(&mut self, entry: ScoreEntry) -> Result<(), StoreError> {
        self.board.insert(entry);
        Ok(())
    }

    fn top(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(self.board.top(limit))
    }
}

/// Scores kept as `[[scores]]` tables in a TOML file
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured path, else the env override, else the platform data dir
    #[must_use]
    pub fn from_config(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::new(path),
            None => Self::new(get_scores_file_path()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Leaderboard, StoreError> {
        if !self.path.exists() {
            return Ok(Leaderboard::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let mut board: Leaderboard = toml::from_str(&contents)?;
        board.sort();
        Ok(board)
    }

    fn save(&self, board: &Leaderboard) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let toml_string = toml::to_string_pretty(board)?;
        fs::write(&self.path, toml_string)?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn submit(&mut self, entry: ScoreEntry) -> Result<(), StoreError> {
        let mut board = self.load()?;
        board.insert(entry);
        self.save(&board)
    }

    fn top(&self, limit: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(self.load()?.top(limit))
    }
}

#[must_use]
pub fn get_scores_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(SCORES_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("chick_stack").join("scores.toml")
    } else {
        PathBuf::from(SCORES_FILE_PATH)
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Parse(err)
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Serialize(err)
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "score store I/O error: {e}"),
            StoreError::Parse(e) => write!(f, "score file is malformed: {e}"),
            StoreError::Serialize(e) => write!(f, "could not encode scores: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}
