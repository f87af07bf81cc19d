//! High score persistence — a single integer stored as text.
//!
//! Default location: `~/.memory-master/memory_high_score`.
//! A missing file means 0. Garbage in the file also means 0 (logged), so a
//! corrupted score never stops the game from starting.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// File name of the high-score record inside the data directory.
pub const HIGH_SCORE_FILE: &str = "memory_high_score";

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where the high score lives between sessions.
pub trait ScoreStore: Send {
    /// Read the stored score. Absence is 0, not an error.
    fn load(&self) -> Result<u32, ScoreError>;

    /// Overwrite the stored score.
    fn save(&mut self, score: u32) -> Result<(), ScoreError>;
}

/// Plain-text file holding one integer.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store inside a data directory, using the standard file name.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(HIGH_SCORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u32, ScoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(ScoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        Ok(parse_score(&content).unwrap_or_else(|| {
            warn!(path = %self.path.display(), "unreadable high score, treating as 0");
            0
        }))
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        let write_err = |source| ScoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&self.path, score.to_string()).map_err(write_err)
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: Option<u32>,
}

impl MemoryScoreStore {
    pub fn with_score(score: u32) -> Self {
        Self { value: Some(score) }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u32, ScoreError> {
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        self.value = Some(score);
        Ok(())
    }
}

/// Parse stored text; tolerates surrounding whitespace.
fn parse_score(text: &str) -> Option<u32> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_zero() {
        let dir = TempDir::new().unwrap();
        let store = FileScoreStore::in_dir(dir.path());
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut store = FileScoreStore::in_dir(&dir.path().join("nested"));
        store.save(7).unwrap();
        assert_eq!(store.load().unwrap(), 7);
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "7");
    }

    #[test]
    fn garbage_is_zero() {
        let dir = TempDir::new().unwrap();
        let store = FileScoreStore::in_dir(dir.path());
        std::fs::write(store.path(), "not a number").unwrap();
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn trailing_newline_tolerated() {
        assert_eq!(parse_score("12\n"), Some(12));
        assert_eq!(parse_score("-1"), None);
    }

    #[test]
    fn memory_store_defaults_to_zero() {
        let mut store = MemoryScoreStore::default();
        assert_eq!(store.load().unwrap(), 0);
        store.save(4).unwrap();
        assert_eq!(store.load().unwrap(), 4);
    }
}
