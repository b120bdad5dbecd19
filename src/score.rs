//! Cumulative win counters across sessions, plus their on-disk form.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ScoreError;
use crate::game::{GameEvent, Player};

/// Wins per player. Ties are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRecord {
    pub player_one: u32,
    pub player_two: u32,
}

impl ScoreRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wins(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    pub fn record_win(&mut self, player: Player) {
        let counter = match player {
            Player::One => &mut self.player_one,
            Player::Two => &mut self.player_two,
        };
        *counter = counter.saturating_add(1);
    }

    /// Apply a session's terminal event. Returns true if the record changed.
    pub fn apply(&mut self, event: GameEvent) -> bool {
        match event {
            GameEvent::Won(player) => {
                self.record_win(player);
                true
            }
            GameEvent::Tied => false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// JSON file holding a [`ScoreRecord`].
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record; a missing file counts as zero wins for both players.
    pub fn load(&self) -> Result<ScoreRecord, ScoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no score file, starting from zero");
            return Ok(ScoreRecord::default());
        }
        let json = fs::read_to_string(&self.path).map_err(|e| ScoreError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ScoreError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Write the record through a temp file so a crash never leaves half a file.
    pub fn save(&self, record: &ScoreRecord) -> Result<(), ScoreError> {
        let json = serde_json::to_string_pretty(record)?;
        let tmp = self.path.with_extension("json.tmp");
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        fs::write(&tmp, json).map_err(|e| self.write_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.write_error(e))?;
        debug!(
            path = %self.path.display(),
            player_one = record.player_one,
            player_two = record.player_two,
            "saved scores"
        );
        Ok(())
    }

    /// Delete the stored record and hand back a zeroed one.
    pub fn clear(&self) -> Result<ScoreRecord, ScoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| self.write_error(e))?;
        }
        info!(path = %self.path.display(), "scores reset");
        Ok(ScoreRecord::default())
    }

    fn write_error(&self, source: std::io::Error) -> ScoreError {
        ScoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}
