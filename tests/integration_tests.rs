//! Integration tests for goban-engine
//!
//! Whole games played through `GameSession`: captures, ko, self-capture,
//! territory, game end, undo/redo and speed-mode clocks.

use goban_engine::board::Occupant;
use goban_engine::clock::Tick;
use goban_engine::config::{ClockPolicy, GameConfig, GameMode, ScoreSeed};
use goban_engine::event::GameEvent;
use goban_engine::playout::random_playout;
use goban_engine::rules::MoveError;
use goban_engine::session::GameSession;
use goban_engine::territory::territory_size;

// =============================================================================
// Helper functions for setting up games
// =============================================================================

/// A normal game without score seeding, so scores are captures + territory.
fn new_game(size: usize, players: usize) -> GameSession {
    GameSession::new(GameConfig::new(size, players).with_seed(ScoreSeed::None)).unwrap()
}

/// Play a sequence of moves in turn order. `None` is a pass.
fn play(game: &mut GameSession, moves: &[Option<(usize, usize)>]) {
    for mv in moves {
        match *mv {
            Some((row, col)) => {
                game.make_move(row, col)
                    .unwrap_or_else(|e| panic!("move ({row}, {col}) failed: {e}"));
            }
            None => game.pass_turn().unwrap(),
        }
    }
}

fn at(row: usize, col: usize) -> Option<(usize, usize)> {
    Some((row, col))
}

const PASS: Option<(usize, usize)> = None;

// =============================================================================
// Capture and legality
// =============================================================================

#[test]
fn test_corner_capture() {
    let mut game = new_game(9, 2);
    play(&mut game, &[at(1, 0), at(0, 0)]);
    assert_eq!(game.make_move(0, 1), Ok(1));

    assert_eq!(game.get_current_state()[0][0], 0);
    assert_eq!(game.captures(1), Some(1));
    assert_eq!(game.score(1), Some(1.0));
    assert_eq!(game.current_player(), 2);
}

#[test]
fn test_filling_surrounded_corner_is_self_capture() {
    let mut game = new_game(9, 2);
    play(&mut game, &[at(0, 1), at(5, 5), at(1, 0)]);
    assert_eq!(game.make_move(0, 0), Err(MoveError::SelfCapture));
    assert_eq!(game.board().at(0, 0), Some(Occupant::Empty));
}

#[test]
fn test_self_capture_leaves_board_and_turn() {
    let mut game = new_game(9, 2);
    play(&mut game, &[at(5, 5), at(0, 1), at(6, 6), at(1, 0)]);
    let before = game.get_current_state();
    game.take_events();

    assert!(!game.is_move_valid(0, 0));
    assert_eq!(game.make_move(0, 0), Err(MoveError::SelfCapture));
    assert_eq!(game.get_current_state(), before);
    assert_eq!(game.current_player(), 1);
    assert_eq!(
        game.take_events(),
        vec![GameEvent::MoveRejected {
            player: 1,
            row: 0,
            col: 0,
            reason: MoveError::SelfCapture,
        }]
    );
}

#[test]
fn test_taking_last_liberty_captures() {
    let mut game = new_game(5, 2);
    play(&mut game, &[at(0, 1), at(0, 0), at(2, 2)]);
    assert_eq!(game.make_move(1, 1), Ok(0));
    assert_eq!(game.make_move(1, 0), Ok(1));
    assert_eq!(game.board().at(0, 0), Some(Occupant::Empty));
}

#[test]
fn test_occupied_always_rejected() {
    let mut game = new_game(7, 3);
    play(&mut game, &[at(3, 3), at(2, 2), at(4, 4)]);
    for (row, col) in [(3, 3), (2, 2), (4, 4)] {
        assert_eq!(game.make_move(row, col), Err(MoveError::Occupied));
        assert!(!game.is_move_valid(row, col));
    }
    assert_eq!(game.current_player(), 1);
}

#[test]
fn test_off_board_rejected() {
    let mut game = new_game(7, 2);
    assert_eq!(
        game.make_move(7, 3),
        Err(MoveError::OutOfBounds { row: 7, col: 3 })
    );
}

// =============================================================================
// Ko
// =============================================================================

/// Sets up a ko around (1, 1) on 9x9. Black has just captured the white stone
/// at (1, 1) by playing (1, 2); White is to move.
fn ko_position() -> GameSession {
    let mut game = new_game(9, 2);
    play(
        &mut game,
        &[
            at(1, 0),
            at(0, 2),
            at(0, 1),
            at(2, 2),
            at(2, 1),
            at(1, 3),
            at(8, 8),
            at(1, 1),
        ],
    );
    assert_eq!(game.make_move(1, 2), Ok(1));
    game
}

#[test]
fn test_immediate_ko_retake_rejected() {
    let mut game = ko_position();
    let before = game.get_current_state();

    assert_eq!(game.make_move(1, 1), Err(MoveError::Ko));
    assert_eq!(game.get_current_state(), before);
    assert_eq!(game.current_player(), 2);
    assert_eq!(game.captures(2), Some(0));
}

#[test]
fn test_ko_retake_allowed_after_exchange() {
    let mut game = ko_position();
    assert_eq!(game.make_move(1, 1), Err(MoveError::Ko));

    play(&mut game, &[at(7, 7), at(6, 6)]);
    assert_eq!(game.make_move(1, 1), Ok(1));
    assert_eq!(game.board().at(1, 2), Some(Occupant::Empty));
}

// =============================================================================
// Territory
// =============================================================================

#[test]
fn test_diagonal_wall_splits_board() {
    let mut game = new_game(7, 2);
    for i in 0..7 {
        play(&mut game, &[at(i, i)]);
        if i < 6 {
            play(&mut game, &[PASS]);
        }
    }

    let territories = game.controlled_territories();
    assert_eq!(territory_size(&territories, 1), 42);
    assert_eq!(territory_size(&territories, 2), 0);
    let black = &territories[&1];
    assert!(black.contains(&(0, 6)));
    assert!(black.contains(&(6, 0)));
}

#[test]
fn test_mixed_border_is_neutral() {
    let mut game = new_game(7, 2);
    play(&mut game, &[at(0, 3), at(6, 3)]);
    assert!(game.controlled_territories().is_empty());
}

#[test]
fn test_territory_is_idempotent() {
    let mut game = new_game(9, 3);
    play(
        &mut game,
        &[at(0, 4), at(4, 0), at(8, 8), at(1, 4), at(4, 1), PASS],
    );
    let board = game.get_current_state();
    let first = game.controlled_territories();
    assert_eq!(game.controlled_territories(), first);
    assert_eq!(game.get_current_state(), board);
}

// =============================================================================
// Passing and game end
// =============================================================================

#[test]
fn test_three_players_pass_to_end() {
    let mut game = new_game(7, 3);
    play(&mut game, &[at(0, 0), PASS, PASS]);
    assert!(!game.is_game_over());
    play(&mut game, &[PASS]);
    assert!(game.is_game_over());

    let result = game.final_score().unwrap();
    assert_eq!(result.territory, vec![48, 0, 0]);
    assert_eq!(result.winners, vec![1]);
    assert_eq!(game.score(1), Some(48.0));
    assert_eq!(game.make_move(3, 3), Err(MoveError::GameOver));
}

#[test]
fn test_move_breaks_pass_sequence() {
    let mut game = new_game(7, 3);
    play(&mut game, &[PASS, PASS, at(3, 3), PASS, PASS]);
    assert!(!game.is_game_over());
    assert_eq!(game.pass_count(), 2);
}

#[test]
fn test_game_over_event_once() {
    let mut game = new_game(5, 2);
    play(&mut game, &[PASS, PASS]);
    let events = game.take_events();
    let count = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(count, 1);
    assert_eq!(game.pass_turn(), Err(MoveError::GameOver));
    assert!(game.take_events().is_empty());
}

#[test]
fn test_tied_game_has_several_winners() {
    let mut game = new_game(5, 2);
    play(&mut game, &[PASS, PASS]);
    assert_eq!(game.final_score().unwrap().winners, vec![1, 2]);
}

// =============================================================================
// Undo and redo
// =============================================================================

#[test]
fn test_undo_redo_round_trip_with_capture() {
    let mut game = new_game(9, 2);
    play(&mut game, &[at(1, 0), at(0, 0)]);
    let before_board = game.get_current_state();
    let before_score = game.scores().to_vec();

    play(&mut game, &[at(0, 1)]);
    let after_board = game.get_current_state();
    let after_score = game.scores().to_vec();

    assert!(game.undo());
    assert_eq!(game.get_current_state(), before_board);
    assert_eq!(game.scores(), before_score.as_slice());
    assert_eq!(game.current_player(), 1);

    assert!(game.redo());
    assert_eq!(game.get_current_state(), after_board);
    assert_eq!(game.scores(), after_score.as_slice());
    assert_eq!(game.current_player(), 2);
}

#[test]
fn test_new_move_clears_redo() {
    let mut game = new_game(9, 2);
    play(&mut game, &[at(4, 4), at(3, 3)]);
    assert!(game.undo());
    assert!(game.can_redo());

    play(&mut game, &[at(5, 5)]);
    assert!(!game.can_redo());
    assert!(!game.redo());
    assert_eq!(game.board().at(3, 3), Some(Occupant::Empty));
}

#[test]
fn test_undo_everything() {
    let mut game = new_game(9, 3);
    play(&mut game, &[at(0, 0), at(1, 1), at(2, 2), at(3, 3)]);
    while game.undo() {}
    assert!(game.get_current_state().iter().flatten().all(|&v| v == 0));
    assert_eq!(game.current_player(), 1);
    assert!(!game.can_undo());
}

// =============================================================================
// Speed mode
// =============================================================================

fn speed_game(turn_time: u32, policy: ClockPolicy) -> GameSession {
    let config = GameConfig::new(9, 2)
        .with_mode(GameMode::Speed)
        .with_turn_time(turn_time)
        .with_clock_policy(policy);
    GameSession::new(config).unwrap()
}

#[test]
fn test_expiry_forces_pass() {
    let mut game = speed_game(3, ClockPolicy::PerTurn);
    assert_eq!(game.tick(1), Tick::Running(2));
    assert_eq!(game.tick(1), Tick::Running(1));
    game.take_events();

    assert_eq!(game.tick(1), Tick::Expired);
    assert_eq!(game.current_player(), 2);
    assert_eq!(game.pass_count(), 1);
    assert_eq!(game.remaining_time(2), Some(3));
    assert!(
        game.take_events()
            .contains(&GameEvent::TurnPassed { player: 1, timed_out: true })
    );
}

#[test]
fn test_ticks_for_waiting_player_ignored() {
    let mut game = speed_game(5, ClockPolicy::PerTurn);
    assert_eq!(game.tick(2), Tick::Ignored);
    assert_eq!(game.remaining_time(2), Some(5));
}

#[test]
fn test_per_turn_clock_refills() {
    let mut game = speed_game(5, ClockPolicy::PerTurn);
    game.tick(1);
    game.tick(1);
    play(&mut game, &[at(4, 4), at(3, 3)]);
    assert_eq!(game.remaining_time(1), Some(5));
}

#[test]
fn test_cumulative_clock_keeps_spent_time() {
    let mut game = speed_game(5, ClockPolicy::Cumulative);
    game.tick(1);
    game.tick(1);
    play(&mut game, &[at(4, 4), at(3, 3)]);
    assert_eq!(game.remaining_time(1), Some(3));
}

#[test]
fn test_all_timeouts_end_game() {
    let mut game = speed_game(1, ClockPolicy::PerTurn);
    assert_eq!(game.tick(1), Tick::Expired);
    assert_eq!(game.tick(2), Tick::Expired);
    assert!(game.is_game_over());
    assert_eq!(game.tick(1), Tick::Ignored);
}

#[test]
fn test_reset_restarts_clocks() {
    let mut game = speed_game(5, ClockPolicy::PerTurn);
    game.tick(1);
    game.tick(1);
    play(&mut game, &[at(4, 4)]);
    game.tick(2);

    game.reset();
    assert_eq!(game.remaining_time(1), Some(5));
    assert_eq!(game.remaining_time(2), Some(5));
    assert_eq!(game.tick(2), Tick::Ignored);
    assert_eq!(game.tick(1), Tick::Running(4));
}

#[test]
fn test_undo_redo_restart_per_turn_clock() {
    let mut game = speed_game(5, ClockPolicy::PerTurn);
    play(&mut game, &[at(4, 4)]);
    game.tick(2);
    game.tick(2);
    game.tick(1);

    assert!(game.undo());
    assert_eq!(game.current_player(), 1);
    assert_eq!(game.remaining_time(1), Some(5));
    assert_eq!(game.tick(1), Tick::Running(4));

    assert!(game.redo());
    assert_eq!(game.current_player(), 2);
    assert_eq!(game.remaining_time(2), Some(5));
    assert_eq!(game.tick(2), Tick::Running(4));
}

#[test]
fn test_undo_keeps_cumulative_clock() {
    let mut game = speed_game(5, ClockPolicy::Cumulative);
    game.tick(1);
    play(&mut game, &[at(4, 4)]);
    game.tick(2);

    assert!(game.undo());
    assert_eq!(game.remaining_time(1), Some(4));
    assert_eq!(game.remaining_time(2), Some(4));
    assert_eq!(game.tick(1), Tick::Running(3));
}

// =============================================================================
// Random self-play
// =============================================================================

#[test]
fn test_random_play_keeps_liberties() {
    for seed in 0..5 {
        let mut game = GameSession::new(GameConfig::new(7, 2 + (seed as usize) % 3)).unwrap();
        let mut rng = fastrand::Rng::with_seed(seed);
        for _ in 0..300 {
            if game.is_game_over() {
                break;
            }
            random_playout(&mut game, &mut rng, 1);
            assert!(
                game.board().zero_liberty_groups().is_empty(),
                "seed {seed}: group without liberties"
            );
        }
    }
}

#[test]
fn test_random_play_scores_add_up() {
    let mut game = new_game(7, 2);
    let mut rng = fastrand::Rng::with_seed(3);
    random_playout(&mut game, &mut rng, 500);
    while !game.is_game_over() {
        game.pass_turn().unwrap();
    }

    let result = game.final_score().unwrap();
    for player in 1..=2u8 {
        let i = usize::from(player) - 1;
        let expected = game.captures(player).unwrap() + result.territory[i];
        assert_eq!(result.scores[i], expected as f64);
    }
}
