//! The saved-game record.
//!
//! A flat, serde-friendly copy of everything needed to resume a game. Records
//! read from storage are untrusted: [`SessionRecord::validate`] checks every
//! field before a session is built from one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::config::{ConfigError, GameMode};
use crate::constants::{MAX_BOARD_SIZE, MAX_PLAYERS, MIN_BOARD_SIZE, MIN_PLAYERS};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record has {0} players")]
    PlayerCount(usize),
    #[error("{names} player names but {scores} scores")]
    Scores { names: usize, scores: usize },
    #[error("current player {0} is not in the game")]
    CurrentPlayer(u8),
    #[error("pass counter {0} is out of range")]
    PassCounter(u8),
    #[error("board size {0} is out of range")]
    BoardSize(usize),
    #[error("board array does not match board size {0}")]
    BoardShape(usize),
    #[error("invalid value {value} at ({row}, {col})")]
    Occupant { row: usize, col: usize, value: u8 },
    #[error("remaining time does not match the game mode or player count")]
    RemainingTime,
    #[error("capture counts do not match the player count")]
    Captures,
    #[error("board holds a group without liberties")]
    DeadGroup,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub game_mode: GameMode,
    pub game_over: bool,
    pub players_names: Vec<String>,
    pub players_scores: Vec<f64>,
    /// Player id (1-based) whose turn it is.
    pub current_player: u8,
    pub pass_turn_counter: u8,
    pub board_size: usize,
    pub board_array: Vec<Vec<u8>>,
    /// Seconds left per player, speed mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_time: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players_captures: Option<Vec<usize>>,
}

impl SessionRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse and validate a record.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let record: SessionRecord = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    pub fn num_players(&self) -> usize {
        self.players_names.len()
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        let n = self.num_players();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&n) {
            return Err(LoadError::PlayerCount(n));
        }
        if self.players_scores.len() != n {
            return Err(LoadError::Scores {
                names: n,
                scores: self.players_scores.len(),
            });
        }
        if !(1..=n).contains(&usize::from(self.current_player)) {
            return Err(LoadError::CurrentPlayer(self.current_player));
        }
        let max_passes = if self.game_over { n } else { n - 1 };
        if usize::from(self.pass_turn_counter) > max_passes {
            return Err(LoadError::PassCounter(self.pass_turn_counter));
        }

        let size = self.board_size;
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(LoadError::BoardSize(size));
        }
        if self.board_array.len() != size || self.board_array.iter().any(|r| r.len() != size) {
            return Err(LoadError::BoardShape(size));
        }
        for (row, values) in self.board_array.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if usize::from(value) > n {
                    return Err(LoadError::Occupant { row, col, value });
                }
            }
        }

        let times_ok = match (self.game_mode, &self.remaining_time) {
            (GameMode::Normal, None) => true,
            (GameMode::Speed, Some(times)) => times.len() == n,
            _ => false,
        };
        if !times_ok {
            return Err(LoadError::RemainingTime);
        }
        if let Some(captures) = &self.players_captures {
            if captures.len() != n {
                return Err(LoadError::Captures);
            }
        }

        if !Board::from_rows(&self.board_array).zero_liberty_groups().is_empty() {
            return Err(LoadError::DeadGroup);
        }
        Ok(())
    }
}
