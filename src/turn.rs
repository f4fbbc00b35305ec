//! Player rotation and the consecutive-pass counter.

use crate::board::PlayerId;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnState {
    /// Not started yet.
    Idle,
    InTurn(PlayerId),
    GameOver,
}

/// Result of a pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// Play continues with the given player.
    Next(PlayerId),
    /// Everybody passed in a row.
    GameOver,
}

#[derive(Clone, Debug)]
pub struct TurnController {
    num_players: u8,
    current: PlayerId,
    passes: u8,
    state: TurnState,
}

impl TurnController {
    pub fn new(num_players: u8) -> Self {
        Self {
            num_players,
            current: 1,
            passes: 0,
            state: TurnState::Idle,
        }
    }

    /// Begin (or restart) play with player 1 and no passes.
    pub fn start(&mut self) {
        self.resume(1, 0);
    }

    /// Continue play from a known position, e.g. after loading a game.
    pub fn resume(&mut self, current: PlayerId, passes: u8) {
        self.current = current;
        self.passes = passes;
        self.state = TurnState::InTurn(current);
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn current(&self) -> PlayerId {
        self.current
    }

    pub fn passes(&self) -> u8 {
        self.passes
    }

    pub fn is_game_over(&self) -> bool {
        self.state == TurnState::GameOver
    }

    /// The player after `player`, wrapping around.
    pub fn following(&self, player: PlayerId) -> PlayerId {
        player % self.num_players + 1
    }

    /// Hand the turn to the next player. The pass counter is left alone;
    /// a successful move clears it through [`TurnController::reset_passes`].
    pub fn next_turn(&mut self) -> PlayerId {
        self.set_current(self.following(self.current));
        self.current
    }

    /// Give the turn to `player` directly (undo/redo).
    pub fn set_current(&mut self, player: PlayerId) {
        self.current = player;
        if !self.is_game_over() {
            self.state = TurnState::InTurn(player);
        }
    }

    pub fn reset_passes(&mut self) {
        self.passes = 0;
    }

    /// Count a pass by the current player and rotate.
    pub fn pass_turn(&mut self) -> PassOutcome {
        self.passes += 1;
        if self.passes >= self.num_players {
            self.finish();
            return PassOutcome::GameOver;
        }
        PassOutcome::Next(self.next_turn())
    }

    pub fn finish(&mut self) {
        self.state = TurnState::GameOver;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle_then_player_one() {
        let mut turns = TurnController::new(3);
        assert_eq!(turns.state(), TurnState::Idle);
        turns.start();
        assert_eq!(turns.state(), TurnState::InTurn(1));
    }

    #[test]
    fn test_rotation_wraps() {
        let mut turns = TurnController::new(3);
        turns.start();
        assert_eq!(turns.next_turn(), 2);
        assert_eq!(turns.next_turn(), 3);
        assert_eq!(turns.next_turn(), 1);
    }

    #[test]
    fn test_all_players_passing_ends_game() {
        let mut turns = TurnController::new(2);
        turns.start();
        assert_eq!(turns.pass_turn(), PassOutcome::Next(2));
        assert_eq!(turns.pass_turn(), PassOutcome::GameOver);
        assert!(turns.is_game_over());
    }

    #[test]
    fn test_reset_passes_interrupts_sequence() {
        let mut turns = TurnController::new(3);
        turns.start();
        turns.pass_turn();
        turns.pass_turn();
        turns.reset_passes();
        turns.next_turn();
        assert_eq!(turns.pass_turn(), PassOutcome::Next(2));
        assert!(!turns.is_game_over());
    }
}
