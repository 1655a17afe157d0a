//! Session Context
//!
//! The single mutable record describing a game session. It is owned by the
//! session controller and only changes through it.

use crate::game::{Move, Outcome};
use serde::{Deserialize, Serialize};

/// Cumulative round outcomes, counted from the agent's perspective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub won: u32,
    pub tie: u32,
    pub lost: u32,
}

impl Tally {
    pub fn get(&self, outcome: Outcome) -> u32 {
        match outcome {
            Outcome::Won => self.won,
            Outcome::Tie => self.tie,
            Outcome::Lost => self.lost,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won => self.won += 1,
            Outcome::Tie => self.tie += 1,
            Outcome::Lost => self.lost += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.won + self.tie + self.lost
    }
}

/// State of a running session.
///
/// `Default` is the fresh context a session starts with and the one a reset
/// returns to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// The latest consent answer.
    pub wants_to_play: bool,
    pub user_choice: Option<Move>,
    pub robot_choice: Option<Move>,
    /// Set when the last recognition result failed validation.
    pub invalid_input: bool,
    pub tally: Tally,
    /// An out-of-band reset was observed and is waiting for the next round.
    pub reset_requested: bool,
    pub games_played: u32,
    pub shown_win_reaction: bool,
    pub shown_lose_reaction: bool,
    /// The comeback override has been used.
    pub shown_special_event: bool,
    /// Consecutive wins when positive, consecutive losses when negative.
    pub seq_streak: i32,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh context with consent already given, as left behind by a reset.
    pub fn after_reset() -> Self {
        Self {
            wants_to_play: true,
            ..Self::default()
        }
    }

    /// Counts a finished round.
    pub fn record_outcome(&mut self, outcome: Outcome) {
        self.tally.record(outcome);
        self.games_played += 1;
    }

    /// Whether the next round should be handed to the agent as a win.
    ///
    /// Fires at most once per session: after more than two rounds, while the
    /// agent has lost more rounds than it has won.
    pub fn comeback_due(&self) -> bool {
        !self.shown_special_event && self.games_played > 2 && self.tally.lost > self.tally.won
    }

    pub fn tally_consistent(&self) -> bool {
        self.tally.total() == self.games_played
    }
}
