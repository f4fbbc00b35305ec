//! goban-engine: a rules engine for Go with two to four players.
//!
//! This crate tracks stones, groups and liberties on an N×N board, validates
//! and resolves moves (capture, self-capture, ko), keeps an undo/redo history,
//! counts territory, and runs turn order with optional speed-mode clocks.
//! Games can be saved to and restored from a JSON record.
//!
//! ## Modules
//!
//! - [`constants`] - Board sizes, player limits and default settings
//! - [`config`] - Game configuration and score seeding
//! - [`board`] - Board arena, intersections and snapshots
//! - [`group`] - Group and liberty queries
//! - [`rules`] - Move legality and capture
//! - [`ko`] - Repetition guard
//! - [`history`] - Undo/redo stacks
//! - [`territory`] - Territory flood-fill
//! - [`turn`] - Player rotation and passes
//! - [`clock`] - Speed-mode countdowns
//! - [`event`] - Notifications for the presentation layer
//! - [`record`] - Saved-game record
//! - [`session`] - A game in progress
//! - [`playout`] - Random self-play
//! - [`console`] - Text command loop
//!
//! ## Example
//!
//! ```
//! use goban_engine::config::{GameConfig, ScoreSeed};
//! use goban_engine::session::GameSession;
//!
//! let config = GameConfig::new(9, 2).with_seed(ScoreSeed::None);
//! let mut game = GameSession::new(config).unwrap();
//!
//! game.make_move(1, 0).unwrap(); // player 1
//! game.make_move(0, 0).unwrap(); // player 2
//! let captured = game.make_move(0, 1).unwrap(); // player 1 takes the corner
//!
//! assert_eq!(captured, 1);
//! assert_eq!(game.get_current_state()[0][0], 0);
//! assert_eq!(game.current_player(), 2);
//! ```

pub mod board;
pub mod clock;
pub mod config;
pub mod console;
pub mod constants;
pub mod event;
pub mod group;
pub mod history;
pub mod ko;
pub mod playout;
pub mod record;
pub mod rules;
pub mod session;
pub mod territory;
pub mod turn;
