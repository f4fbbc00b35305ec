//! Default values and hard bounds for game configuration.
//!
//! Everything here is a default or a limit. The values actually used by a game
//! live in [`GameConfig`](crate::config::GameConfig), which is passed into the
//! session at construction time.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board sizes offered to players. Any size in `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`
/// is accepted, these are just the canonical ones.
pub const BOARD_SIZES: [usize; 5] = [7, 9, 13, 16, 19];

/// Default board size (NxN).
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Smallest board the engine accepts.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest board the engine accepts.
pub const MAX_BOARD_SIZE: usize = 25;

// =============================================================================
// Players
// =============================================================================

/// Minimum number of players in a game.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 4;

/// Glyphs used when printing the board, indexed by player id - 1.
pub const PLAYER_GLYPHS: [char; MAX_PLAYERS] = ['X', 'O', '#', '@'];

/// Glyph for an empty intersection.
pub const EMPTY_GLYPH: char = '.';

// =============================================================================
// Scoring
// =============================================================================

/// Komi given to the second player of a two-player game.
pub const DEFAULT_KOMI: f64 = 7.5;

/// Ratio between consecutive seats when seeding scores for 3+ players.
pub const DEFAULT_SEED_RATIO: f64 = 0.5;

// =============================================================================
// Clocks
// =============================================================================

/// Seconds on each player's clock in speed mode.
pub const DEFAULT_TURN_TIME: u32 = 10;

/// Interval between clock ticks, in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 1000;

// =============================================================================
// Self-play
// =============================================================================

/// Turn limit for random self-play (3 times board area, as for playouts).
pub fn max_playout_turns(board_size: usize) -> usize {
    board_size * board_size * 3
}
