//! A game in progress.
//!
//! [`GameSession`] owns the board, the history, the turn controller and the
//! optional clocks for one game, and is the only way to change any of them.
//! Every public method runs to completion before returning, so callers that
//! need a timer (speed mode) must deliver [`GameSession::tick`] calls on the
//! same thread, between other calls.
//!
//! State changes are reported as [`GameEvent`]s, queued until the caller
//! collects them with [`GameSession::take_events`].

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::board::{Board, PlayerId};
use crate::clock::{Clock, Tick};
use crate::config::{ConfigError, GameConfig, GameMode};
use crate::event::GameEvent;
use crate::history::History;
use crate::ko;
use crate::record::{LoadError, SessionRecord};
use crate::rules::MoveError;
use crate::territory::{self, Territories};
use crate::turn::{PassOutcome, TurnController};

/// Scores once the game has ended.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FinalScore {
    /// Seed + captures + territory, per player.
    pub scores: Vec<f64>,
    /// Territory counted for each player.
    pub territory: Vec<usize>,
    /// Players sharing the best score.
    pub winners: Vec<PlayerId>,
}

impl FinalScore {
    fn new(scores: Vec<f64>, territory: Vec<usize>) -> Self {
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let winners = scores
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s >= best)
            .map(|(i, _)| (i + 1) as PlayerId)
            .collect();
        Self {
            scores,
            territory,
            winners,
        }
    }
}

pub struct GameSession {
    config: GameConfig,
    board: Board,
    history: History,
    turns: TurnController,
    clock: Option<Clock>,
    scores: Vec<f64>,
    captures: Vec<usize>,
    events: Vec<GameEvent>,
    result: Option<FinalScore>,
}

impl GameSession {
    /// Start a new game.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let n = config.num_players();
        let mut session = Self {
            board: Board::new(config.board_size),
            history: History::new(),
            turns: TurnController::new(n as u8),
            clock: new_clock(&config),
            scores: config.score_seed().initial_scores(n),
            captures: vec![0; n],
            events: Vec::new(),
            result: None,
            config,
        };
        session.turns.start();
        if let Some(clock) = &mut session.clock {
            clock.start_turn(1);
        }
        debug!(
            size = session.config.board_size,
            players = n,
            mode = ?session.config.mode,
            "game started"
        );
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn num_players(&self) -> usize {
        self.config.num_players()
    }

    pub fn player_names(&self) -> &[String] {
        &self.config.players
    }

    pub fn current_player(&self) -> PlayerId {
        self.turns.current()
    }

    pub fn pass_count(&self) -> u8 {
        self.turns.passes()
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn score(&self, player: PlayerId) -> Option<f64> {
        self.scores.get(slot(player)?).copied()
    }

    pub fn captures(&self, player: PlayerId) -> Option<usize> {
        self.captures.get(slot(player)?).copied()
    }

    pub fn is_game_over(&self) -> bool {
        self.turns.is_game_over()
    }

    /// Final scores, once the game has ended.
    pub fn final_score(&self) -> Option<&FinalScore> {
        self.result.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        !self.is_game_over() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.is_game_over() && self.history.can_redo()
    }

    /// Occupant grid, 0 for empty and the player id otherwise.
    pub fn get_current_state(&self) -> Vec<Vec<u8>> {
        self.board.to_rows()
    }

    pub fn controlled_territories(&self) -> Territories {
        territory::controlled_territories(&self.board)
    }

    /// Seconds left on `player`'s clock; `None` outside speed mode.
    pub fn remaining_time(&self, player: PlayerId) -> Option<u32> {
        self.clock.as_ref()?.remaining(player)
    }

    /// Drain the queued events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the current player may play at (row, col). Ko is not checked
    /// here: it depends on the resolved board and is reported by
    /// [`GameSession::make_move`].
    pub fn is_move_valid(&mut self, row: usize, col: usize) -> bool {
        self.is_move_valid_for(row, col, self.current_player())
    }

    pub fn is_move_valid_for(&mut self, row: usize, col: usize, player: PlayerId) -> bool {
        if self.is_game_over() {
            return false;
        }
        match self.board.point(row, col) {
            Some(pt) => self.board.is_move_valid(pt, player),
            None => false,
        }
    }

    /// Place a stone for the current player. Returns the number of stones
    /// captured. On error nothing has changed.
    pub fn make_move(&mut self, row: usize, col: usize) -> Result<usize, MoveError> {
        let player = self.current_player();
        let result = self.place(row, col, player);
        if let Err(reason) = result {
            debug!(player, row, col, %reason, "move rejected");
            self.events.push(GameEvent::MoveRejected {
                player,
                row,
                col,
                reason,
            });
        }
        result
    }

    fn place(&mut self, row: usize, col: usize, player: PlayerId) -> Result<usize, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        let pt = self
            .board
            .point(row, col)
            .ok_or(MoveError::OutOfBounds { row, col })?;
        self.board.check_move(pt, player)?;

        let before = self.board.snapshot();
        let captured = self.board.apply_move(pt, player);
        let after = self.board.snapshot();
        if ko::is_ko(&self.history, self.num_players(), player, &before, &after, pt) {
            self.board.restore(&before);
            return Err(MoveError::Ko);
        }
        debug_assert!(self.board.zero_liberty_groups().is_empty());

        self.history.record(before, player, captured);
        self.turns.reset_passes();
        debug!(player, row, col, captured, "stone placed");
        if captured > 0 {
            self.credit(player, captured);
        }
        let next = self.turns.next_turn();
        self.begin_turn(next);
        Ok(captured)
    }

    /// The current player passes. All players passing in a row ends the game.
    pub fn pass_turn(&mut self) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        self.pass(false);
        Ok(())
    }

    fn pass(&mut self, timed_out: bool) {
        let player = self.current_player();
        debug!(player, timed_out, "turn passed");
        self.events.push(GameEvent::TurnPassed { player, timed_out });
        match self.turns.pass_turn() {
            PassOutcome::Next(next) => self.begin_turn(next),
            PassOutcome::GameOver => self.finish(),
        }
    }

    /// Take back the latest move. Returns `false` when there is nothing to undo
    /// or the game is over.
    pub fn undo(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let Some(record) = self.history.undo(self.board.snapshot()) else {
            return false;
        };
        self.board.restore(&record.board);
        self.debit(record.player, record.captured);
        self.turns.reset_passes();
        self.turns.set_current(record.player);
        debug!(player = record.player, "move undone");
        self.events.push(GameEvent::BoardRestored);
        self.begin_turn(record.player);
        true
    }

    /// Replay the latest undone move.
    pub fn redo(&mut self) -> bool {
        if self.is_game_over() {
            return false;
        }
        let Some(record) = self.history.redo(self.board.snapshot()) else {
            return false;
        };
        self.board.restore(&record.board);
        self.credit(record.player, record.captured);
        self.turns.reset_passes();
        let next = self.turns.following(record.player);
        self.turns.set_current(next);
        debug!(player = record.player, "move redone");
        self.events.push(GameEvent::BoardRestored);
        self.begin_turn(next);
        true
    }

    /// Clear the board and start over with the same configuration.
    pub fn reset(&mut self) {
        let n = self.num_players();
        self.board.clear();
        self.history.clear();
        self.scores = self.config.score_seed().initial_scores(n);
        self.captures = vec![0; n];
        self.result = None;
        self.turns.start();
        if let Some(clock) = &mut self.clock {
            clock.reset();
        }
        info!("game reset");
        self.events.push(GameEvent::BoardReset);
        self.begin_turn(1);
    }

    /// One second passes for `player`. Only the player to move has a running
    /// clock; running out of time passes the turn.
    pub fn tick(&mut self, player: PlayerId) -> Tick {
        if self.is_game_over() || player != self.current_player() {
            return Tick::Ignored;
        }
        let Some(clock) = &mut self.clock else {
            return Tick::Ignored;
        };
        let tick = clock.tick(player);
        match tick {
            Tick::Running(remaining) => {
                self.events.push(GameEvent::TimeUpdated { player, remaining });
            }
            Tick::Expired => {
                info!(player, "out of time");
                self.events.push(GameEvent::TimeUpdated {
                    player,
                    remaining: 0,
                });
                self.pass(true);
            }
            Tick::Ignored => {}
        }
        tick
    }

    fn begin_turn(&mut self, player: PlayerId) {
        self.events.push(GameEvent::PlayerChanged { player });
        if let Some(clock) = &mut self.clock {
            clock.start_turn(player);
            if let Some(remaining) = clock.remaining(player) {
                self.events.push(GameEvent::TimeUpdated { player, remaining });
            }
        }
    }

    fn credit(&mut self, player: PlayerId, captured: usize) {
        let Some(i) = slot(player) else { return };
        self.captures[i] += captured;
        self.scores[i] += captured as f64;
        self.score_updated(player);
    }

    fn debit(&mut self, player: PlayerId, captured: usize) {
        let Some(i) = slot(player) else { return };
        if captured == 0 {
            return;
        }
        self.captures[i] = self.captures[i].saturating_sub(captured);
        self.scores[i] -= captured as f64;
        self.score_updated(player);
    }

    fn score_updated(&mut self, player: PlayerId) {
        let i = usize::from(player) - 1;
        self.events.push(GameEvent::ScoreUpdated {
            player,
            score: self.scores[i],
            captures: self.captures[i],
        });
    }

    /// Stop the clocks and add territory to the scores, once.
    fn finish(&mut self) {
        self.turns.finish();
        if let Some(clock) = &mut self.clock {
            clock.stop();
        }
        if self.result.is_some() {
            return;
        }

        let territories = self.controlled_territories();
        let territory: Vec<usize> = (1..=self.num_players())
            .map(|p| territory::territory_size(&territories, p as PlayerId))
            .collect();
        for (i, &size) in territory.iter().enumerate() {
            if size > 0 {
                self.scores[i] += size as f64;
                self.score_updated((i + 1) as PlayerId);
            }
        }

        let result = FinalScore::new(self.scores.clone(), territory);
        info!(scores = ?result.scores, winners = ?result.winners, "game over");
        self.events.push(GameEvent::GameOver {
            scores: result.scores.clone(),
            winners: result.winners.clone(),
        });
        self.result = Some(result);
    }

    /// Flat copy of the session for saving.
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            game_mode: self.config.mode,
            game_over: self.is_game_over(),
            players_names: self.config.players.clone(),
            players_scores: self.scores.clone(),
            current_player: self.current_player(),
            pass_turn_counter: self.pass_count(),
            board_size: self.board.size(),
            board_array: self.board.to_rows(),
            remaining_time: self.clock.as_ref().map(|c| c.all_remaining().to_vec()),
            players_captures: Some(self.captures.clone()),
        }
    }

    /// Rebuild a session from a saved record. Settings the record does not
    /// carry (turn time, clock policy, score seed) come from `template`. Undo
    /// history is not saved, so the loaded game starts with none.
    pub fn from_record(record: SessionRecord, template: &GameConfig) -> Result<Self, LoadError> {
        if let Err(err) = record.validate() {
            warn!(%err, "rejecting saved game");
            return Err(err);
        }
        let n = record.num_players();
        let config = GameConfig {
            board_size: record.board_size,
            players: record.players_names,
            mode: record.game_mode,
            ..template.clone()
        };
        config.validate()?;

        let mut turns = TurnController::new(n as u8);
        turns.resume(record.current_player, record.pass_turn_counter);
        let mut clock = new_clock(&config);
        if let (Some(clock), Some(times)) = (&mut clock, &record.remaining_time) {
            clock.set_remaining(times);
            if !record.game_over {
                clock.resume();
            }
        }

        let board = Board::from_rows(&record.board_array);
        let result = record.game_over.then(|| {
            let territories = territory::controlled_territories(&board);
            let territory = (1..=n)
                .map(|p| territory::territory_size(&territories, p as PlayerId))
                .collect();
            FinalScore::new(record.players_scores.clone(), territory)
        });
        if record.game_over {
            turns.finish();
        }

        debug!(size = config.board_size, players = n, "game loaded");
        Ok(Self {
            board,
            history: History::new(),
            turns,
            clock,
            scores: record.players_scores,
            captures: record.players_captures.unwrap_or_else(|| vec![0; n]),
            events: Vec::new(),
            result,
            config,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        self.to_record().to_json()
    }

    pub fn from_json(json: &str, template: &GameConfig) -> Result<Self, LoadError> {
        let record: SessionRecord = serde_json::from_str(json)?;
        Self::from_record(record, template)
    }

    /// The configured game mode.
    pub fn mode(&self) -> GameMode {
        self.config.mode
    }
}

fn new_clock(config: &GameConfig) -> Option<Clock> {
    (config.mode == GameMode::Speed)
        .then(|| Clock::new(config.num_players(), config.turn_time, config.clock_policy))
}

fn slot(player: PlayerId) -> Option<usize> {
    usize::from(player).checked_sub(1)
}
