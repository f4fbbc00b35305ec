//! Game configuration.
//!
//! A [`GameConfig`] is built once (from CLI flags, a JSON file, or code) and
//! handed to [`GameSession::new`](crate::session::GameSession::new). Nothing in
//! the engine reads global settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Whether the game runs with countdown clocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameMode {
    #[default]
    Normal,
    Speed,
}

/// How a player's clock is refilled in speed mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockPolicy {
    /// The full budget is restored every time the player's turn begins.
    #[default]
    PerTurn,
    /// The budget is spent across the whole game, like a chess clock.
    Cumulative,
}

/// Initial score offsets compensating for turn order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSeed {
    /// Everybody starts at zero.
    None,
    /// The last seat receives the given komi, everybody else starts at zero.
    Komi(f64),
    /// Seat `k` (0-based) of `n` receives `base * ratio^(n - 1 - k)`, except the
    /// first seat which receives nothing.
    Geometric { base: f64, ratio: f64 },
}

impl ScoreSeed {
    /// The default seed for a player count: komi for two players, geometric
    /// falloff for more.
    pub fn for_players(num_players: usize) -> Self {
        if num_players <= 2 {
            ScoreSeed::Komi(DEFAULT_KOMI)
        } else {
            ScoreSeed::Geometric {
                base: DEFAULT_KOMI,
                ratio: DEFAULT_SEED_RATIO,
            }
        }
    }

    /// Initial score of every seat.
    pub fn initial_scores(&self, num_players: usize) -> Vec<f64> {
        (0..num_players)
            .map(|seat| match *self {
                _ if seat == 0 => 0.0,
                ScoreSeed::None => 0.0,
                ScoreSeed::Komi(komi) => {
                    if seat + 1 == num_players {
                        komi
                    } else {
                        0.0
                    }
                }
                ScoreSeed::Geometric { base, ratio } => {
                    base * ratio.powi((num_players - 1 - seat) as i32)
                }
            })
            .collect()
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size {0} is outside {min}..={max}", min = MIN_BOARD_SIZE, max = MAX_BOARD_SIZE)]
    BoardSize(usize),
    #[error("{0} players requested, the game supports {min}..={max}", min = MIN_PLAYERS, max = MAX_PLAYERS)]
    PlayerCount(usize),
    #[error("speed mode needs a turn time of at least one second")]
    TurnTime,
}

/// Everything needed to start a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    /// Display names, one per player, in seat order.
    pub players: Vec<String>,
    pub mode: GameMode,
    /// Seconds on each clock in speed mode.
    pub turn_time: u32,
    pub clock_policy: ClockPolicy,
    /// Score seeding; `None` picks [`ScoreSeed::for_players`].
    pub seed: Option<ScoreSeed>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            players: default_names(MIN_PLAYERS),
            mode: GameMode::Normal,
            turn_time: DEFAULT_TURN_TIME,
            clock_policy: ClockPolicy::PerTurn,
            seed: None,
        }
    }
}

impl GameConfig {
    /// A normal-mode game with default names for `num_players` players.
    pub fn new(board_size: usize, num_players: usize) -> Self {
        Self {
            board_size,
            players: default_names(num_players),
            ..Self::default()
        }
    }

    pub fn with_players<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.players = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_turn_time(mut self, seconds: u32) -> Self {
        self.turn_time = seconds;
        self
    }

    pub fn with_clock_policy(mut self, policy: ClockPolicy) -> Self {
        self.clock_policy = policy;
        self
    }

    pub fn with_seed(mut self, seed: ScoreSeed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// The seed in effect, resolving the default for the player count.
    pub fn score_seed(&self) -> ScoreSeed {
        self.seed
            .unwrap_or_else(|| ScoreSeed::for_players(self.num_players()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.num_players()) {
            return Err(ConfigError::PlayerCount(self.num_players()));
        }
        if self.mode == GameMode::Speed && self.turn_time == 0 {
            return Err(ConfigError::TurnTime);
        }
        Ok(())
    }
}

/// "Player 1", "Player 2", ...
pub fn default_names(num_players: usize) -> Vec<String> {
    (1..=num_players).map(|i| format!("Player {i}")).collect()
}
