//! Notifications for the presentation layer.
//!
//! The session queues events as it changes state; the caller drains them with
//! [`GameSession::take_events`](crate::session::GameSession::take_events) after
//! each call.

use std::fmt;

use serde::Serialize;

use crate::board::PlayerId;
use crate::rules::MoveError;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// It is now `player`'s turn.
    PlayerChanged { player: PlayerId },
    ScoreUpdated {
        player: PlayerId,
        score: f64,
        captures: usize,
    },
    TimeUpdated { player: PlayerId, remaining: u32 },
    MoveRejected {
        player: PlayerId,
        row: usize,
        col: usize,
        reason: MoveError,
    },
    TurnPassed { player: PlayerId, timed_out: bool },
    /// A move was taken back or replayed; the board changed wholesale.
    BoardRestored,
    BoardReset,
    GameOver {
        scores: Vec<f64>,
        winners: Vec<PlayerId>,
    },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::PlayerChanged { player } => write!(f, "player {player} to move"),
            GameEvent::ScoreUpdated {
                player,
                score,
                captures,
            } => write!(f, "player {player} score {score} ({captures} captured)"),
            GameEvent::TimeUpdated { player, remaining } => {
                write!(f, "player {player} has {remaining}s left")
            }
            GameEvent::MoveRejected {
                player,
                row,
                col,
                reason,
            } => write!(f, "player {player} at ({row}, {col}) rejected: {reason}"),
            GameEvent::TurnPassed { player, timed_out } => {
                if *timed_out {
                    write!(f, "player {player} ran out of time and passes")
                } else {
                    write!(f, "player {player} passes")
                }
            }
            GameEvent::BoardRestored => write!(f, "board restored"),
            GameEvent::BoardReset => write!(f, "board reset"),
            GameEvent::GameOver { scores, winners } => {
                let winners: Vec<String> = winners.iter().map(ToString::to_string).collect();
                write!(f, "game over, scores {scores:?}, winner {}", winners.join(" & "))
            }
        }
    }
}
