//! Random self-play.
//!
//! A playout drives a [`GameSession`] with random legal moves until every
//! player passes in a row or a turn limit is reached. Players never fill their
//! own single-point eyes, so games on open boards do end.

use fastrand::Rng;
use tracing::debug;

use crate::board::{Board, Occupant, PlayerId, Point};
use crate::rules::MoveError;
use crate::session::GameSession;

/// What happened during a playout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayoutSummary {
    /// Stones placed.
    pub moves: usize,
    pub passes: usize,
    /// Candidates turned down by the session (ko or self-capture).
    pub rejected: usize,
    pub captures: usize,
}

/// Play random moves on `session` for at most `max_turns` turns (moves plus
/// passes). Stops early when the game ends. Events queued by the session
/// during the playout are discarded.
pub fn random_playout(session: &mut GameSession, rng: &mut Rng, max_turns: usize) -> PlayoutSummary {
    let mut summary = PlayoutSummary::default();

    for _ in 0..max_turns {
        if session.is_game_over() {
            break;
        }
        match play_random_move(session, rng, &mut summary) {
            Some(captured) => {
                summary.moves += 1;
                summary.captures += captured;
            }
            None => {
                if let Err(err) = session.pass_turn() {
                    debug!(%err, "pass refused");
                    break;
                }
                summary.passes += 1;
            }
        }
    }
    session.take_events();

    debug!(?summary, game_over = session.is_game_over(), "playout finished");
    summary
}

/// Try the candidates in random order; `None` when nothing is playable.
fn play_random_move(session: &mut GameSession, rng: &mut Rng, summary: &mut PlayoutSummary) -> Option<usize> {
    let player = session.current_player();
    let mut candidates = candidate_points(session.board(), player);
    rng.shuffle(&mut candidates);

    for pt in candidates {
        let (row, col) = session.board().coords(pt);
        match session.make_move(row, col) {
            Ok(captured) => return Some(captured),
            Err(MoveError::Ko | MoveError::SelfCapture) => summary.rejected += 1,
            Err(_) => return None,
        }
    }
    None
}

/// Empty points that are not one of `player`'s own eyes.
fn candidate_points(board: &Board, player: PlayerId) -> Vec<Point> {
    board
        .points()
        .filter(|&pt| board.get(pt).is_empty() && !is_own_eye(board, pt, player))
        .collect()
}

/// An empty point whose neighbors are all `player`'s stones.
fn is_own_eye(board: &Board, pt: Point, player: PlayerId) -> bool {
    board
        .neighbors(pt)
        .iter()
        .all(|&n| board.get(n) == Occupant::Stone(player))
}
