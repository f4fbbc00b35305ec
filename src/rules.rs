//! Move legality and capture resolution.
//!
//! Legality is decided by liberty arithmetic alone: a move is legal if the
//! target is empty and the placed stone either keeps a liberty (directly or
//! through its group) or takes the last liberty of an enemy group. There is no
//! separate suicide rule. Ko is checked afterwards by the session, on the
//! resolved board (see [`crate::ko`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Occupant, PlayerId, Point};

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveError {
    /// Point is not empty
    #[error("Illegal move: point not empty")]
    Occupied,
    /// The stone would have no liberty and captures nothing
    #[error("Illegal move: self-capture")]
    SelfCapture,
    /// The move recreates the position of one round ago
    #[error("Illegal move: retakes ko")]
    Ko,
    #[error("Illegal move: ({row}, {col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("Illegal move: the game is over")]
    GameOver,
}

impl Board {
    /// Decide whether `player` may place a stone at `pt`, ignoring ko.
    ///
    /// The board is left exactly as it was found: the stone placed for the
    /// liberty test is removed again on every path.
    pub fn check_move(&mut self, pt: Point, player: PlayerId) -> Result<(), MoveError> {
        if !self.get(pt).is_empty() {
            return Err(MoveError::Occupied);
        }

        if self.liberties(pt) > 0 {
            return Ok(());
        }

        self.set(pt, Occupant::Stone(player));
        let verdict = self.tentative_verdict(pt);
        self.set(pt, Occupant::Empty);
        verdict
    }

    /// Boolean form of [`Board::check_move`].
    pub fn is_move_valid(&mut self, pt: Point, player: PlayerId) -> bool {
        self.check_move(pt, player).is_ok()
    }

    /// Liberty test with the stone already on `pt`.
    fn tentative_verdict(&self, pt: Point) -> Result<(), MoveError> {
        let own = self.group(pt);
        if self.group_liberties(&own) > 0 {
            return Ok(());
        }

        let captures = self
            .adjacent_enemy_groups(pt)
            .iter()
            .any(|g| self.group_liberties(g) == 0);
        if captures {
            Ok(())
        } else {
            Err(MoveError::SelfCapture)
        }
    }

    /// Place `player`'s stone at `pt` and remove every adjacent enemy group
    /// left without liberties. Returns the number of stones removed.
    ///
    /// The move must have passed [`Board::check_move`].
    pub fn apply_move(&mut self, pt: Point, player: PlayerId) -> usize {
        debug_assert!(self.get(pt).is_empty(), "apply_move on occupied point");
        self.set(pt, Occupant::Stone(player));

        let mut captured = 0;
        for group in self.adjacent_enemy_groups(pt) {
            if self.group_liberties(&group) == 0 {
                captured += group.len();
                for member in group {
                    self.set(member, Occupant::Empty);
                }
            }
        }
        captured
    }
}
