//! Countdown clocks for speed mode.
//!
//! One [`Clock`] holds every player's remaining seconds. It knows nothing about
//! wall time: an external driver calls [`Clock::tick`] once per second for the
//! player whose turn it is.

use crate::board::PlayerId;
use crate::config::ClockPolicy;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The clock is stopped or the player is unknown.
    Ignored,
    /// Seconds left after this tick.
    Running(u32),
    /// The player just ran out of time.
    Expired,
}

#[derive(Clone, Debug)]
pub struct Clock {
    policy: ClockPolicy,
    budget: u32,
    remaining: Vec<u32>,
    running: bool,
}

impl Clock {
    /// Every player starts with `budget` seconds. The clock is stopped until
    /// [`Clock::start_turn`] is called.
    pub fn new(num_players: usize, budget: u32, policy: ClockPolicy) -> Self {
        Self {
            policy,
            budget,
            remaining: vec![budget; num_players],
            running: false,
        }
    }

    pub fn remaining(&self, player: PlayerId) -> Option<u32> {
        self.remaining.get(slot(player)?).copied()
    }

    pub fn all_remaining(&self) -> &[u32] {
        &self.remaining
    }

    /// Overwrite the remaining times, e.g. from a saved game.
    pub fn set_remaining(&mut self, remaining: &[u32]) {
        for (dst, &src) in self.remaining.iter_mut().zip(remaining) {
            *dst = src;
        }
    }

    /// `player`'s turn begins. Under [`ClockPolicy::PerTurn`] their budget is
    /// refilled; other players' clocks are untouched.
    pub fn start_turn(&mut self, player: PlayerId) {
        if self.policy == ClockPolicy::PerTurn {
            if let Some(t) = slot(player).and_then(|i| self.remaining.get_mut(i)) {
                *t = self.budget;
            }
        }
        self.running = true;
    }

    /// Start counting again without touching any remaining time.
    pub fn resume(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Refill every clock and stop.
    pub fn reset(&mut self) {
        self.remaining.fill(self.budget);
        self.running = false;
    }

    /// One second passes on `player`'s clock.
    pub fn tick(&mut self, player: PlayerId) -> Tick {
        if !self.running {
            return Tick::Ignored;
        }
        let Some(t) = slot(player).and_then(|i| self.remaining.get_mut(i)) else {
            return Tick::Ignored;
        };
        *t = t.saturating_sub(1);
        if *t == 0 {
            Tick::Expired
        } else {
            Tick::Running(*t)
        }
    }
}

fn slot(player: PlayerId) -> Option<usize> {
    usize::from(player).checked_sub(1)
}
