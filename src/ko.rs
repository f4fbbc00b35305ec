//! Ko detection.
//!
//! A move is a ko violation when it recreates, exactly, the board that stood
//! right after the mover's own previous move. Only that one position is
//! compared; longer cycles (positional superko) are allowed.

use crate::board::{PlayerId, Point, Snapshot};
use crate::history::History;

/// Whether placing at `at` (turning `before` into `after`) retakes a ko.
pub fn is_ko(
    history: &History,
    num_players: usize,
    mover: PlayerId,
    before: &Snapshot,
    after: &Snapshot,
    at: Point,
) -> bool {
    // every player must have had a turn
    if history.len() < num_players {
        return false;
    }
    let Some(previous) = history.board_after_last_move_of(mover, before) else {
        return false;
    };
    previous.get(at) == after.get(at) && previous == after
}
