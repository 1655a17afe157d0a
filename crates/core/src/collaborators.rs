//! Capability interfaces to the world outside the state machine.
//!
//! The session controller never talks to hardware, speech services or storage
//! directly. It goes through these traits, so any runtime (a robot connector,
//! a console, a test double) can drive a session.

use crate::{game::Move, summary::SessionSummary};
use anyhow::Result;
use async_trait::async_trait;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Text understood by the speech recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub text: String,
}

impl RecognitionResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Which kind of answer the recognizer should listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentProfile {
    YesNo,
    Moves,
}

impl IntentProfile {
    pub fn name(self) -> &'static str {
        match self {
            IntentProfile::YesNo => "answer_yesno",
            IntentProfile::Moves => "answers",
        }
    }
}

/// A physical or audio effect the agent can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reaction {
    Intro,
    StartGame,
    /// Shows the agent's own move.
    Reveal(Move),
    /// The once-per-session comeback celebration.
    Comeback,
    Happy,
    Sad,
    Farewell,
}

impl Reaction {
    /// Stable behavior identifier understood by actuation backends.
    pub fn behavior_id(self) -> &'static str {
        match self {
            Reaction::Intro => "intro/behavior_1",
            Reaction::StartGame => "startgame/behavior_1",
            Reaction::Reveal(Move::Rock) => "rock/behavior_1",
            Reaction::Reveal(Move::Paper) => "paper/behavior_1",
            Reaction::Reveal(Move::Scissors) => "scissors/behavior_1",
            Reaction::Comeback => "robogod/behavior_1",
            Reaction::Happy => "happy/behavior_1",
            Reaction::Sad => "sad/behavior_1",
            Reaction::Farewell => "goodby/behavior_1",
        }
    }
}

/// Status lights shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// A question is open and the agent is listening.
    Listening,
    Idle,
    /// The manual reset trigger is armed.
    ResetArmed,
}

/// Out-of-band events, polled by the controller at round boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// Start over with a fresh score.
    Reset,
    /// Answers the opening question with "yes" without speaking.
    QuickConsent,
}

#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Listens for one answer. `Ok(None)` means nothing was understood within
    /// `timeout`.
    async fn recognize(
        &self,
        profile: IntentProfile,
        timeout: Duration,
    ) -> Result<Option<RecognitionResult>>;

    async fn release(&self) {}
}

#[async_trait]
pub trait Actuator: Send + Sync {
    /// Fire-and-continue effect.
    async fn perform(&self, reaction: Reaction);

    async fn set_indicator(&self, indicator: Indicator);

    async fn release(&self) {}
}

#[async_trait]
pub trait Announcer: Send + Sync {
    /// Speaks an already rendered line and returns once it has been delivered.
    async fn say(&self, text: &str);
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SummarySink: Send + Sync {
    /// Durably stores the session summary, returning where it was written.
    async fn persist(&self, summary: &SessionSummary) -> Result<String>;
}

/// Chooses the agent's move for a round.
pub trait MovePicker: Send {
    fn pick(&mut self) -> Move;
}

/// Picks uniformly at random.
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl MovePicker for RandomPicker {
    fn pick(&mut self) -> Move {
        Move::ALL[self.rng.random_range(0..Move::ALL.len())]
    }
}
