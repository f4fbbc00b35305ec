//! Undo/redo stacks.
//!
//! Every accepted move pushes a [`MoveRecord`] holding the board as it was
//! *before* the move. Undoing pops that record, swaps in the live board as the
//! redo entry, and hands the record back so the session can restore the board
//! and take back the score.

use crate::board::{PlayerId, Snapshot};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    /// Board on the other side of this move: before it on the undo stack,
    /// after it on the redo stack.
    pub board: Snapshot,
    /// The player who made the move.
    pub player: PlayerId,
    /// Stones removed by the move.
    pub captured: usize,
}

#[derive(Default, Debug)]
pub struct History {
    undo: Vec<MoveRecord>,
    redo: Vec<MoveRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new move. Any redo history is dropped: the game has diverged.
    pub fn record(&mut self, before: Snapshot, player: PlayerId, captured: usize) {
        self.redo.clear();
        self.undo.push(MoveRecord {
            board: before,
            player,
            captured,
        });
    }

    /// Pop the latest move. `live` is the current board; it is kept on the
    /// redo stack. The returned record carries the board to restore.
    pub fn undo(&mut self, live: Snapshot) -> Option<MoveRecord> {
        let record = self.undo.pop()?;
        self.redo.push(MoveRecord {
            board: live,
            player: record.player,
            captured: record.captured,
        });
        Some(record)
    }

    /// Re-apply the latest undone move, keeping `live` on the undo stack.
    pub fn redo(&mut self, live: Snapshot) -> Option<MoveRecord> {
        let record = self.redo.pop()?;
        self.undo.push(MoveRecord {
            board: live,
            player: record.player,
            captured: record.captured,
        });
        Some(record)
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Number of moves that can be undone.
    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// The board as it stood right after `player`'s most recent move.
    ///
    /// Records store the board before each move, so the position after move
    /// `i` is the board of record `i + 1`, or `current` (the live board) when
    /// `i` is the latest move.
    pub fn board_after_last_move_of<'a>(
        &'a self,
        player: PlayerId,
        current: &'a Snapshot,
    ) -> Option<&'a Snapshot> {
        let i = self.undo.iter().rposition(|m| m.player == player)?;
        Some(self.undo.get(i + 1).map_or(current, |next| &next.board))
    }
}
