//! Session Controller
//!
//! Drives one game session from the welcome to the final summary:
//!
//! `Welcome -> ConsentGate -> RoundLoop -> SummaryAndExit`
//!
//! Every question runs an ask/validate/retry loop that only ends on a valid
//! answer. Out-of-band signals are drained at the top of each round pass, so a
//! reset never interrupts a question or a round in progress.

use crate::{
    collaborators::{
        Actuator, Announcer, ControlSignal, Indicator, IntentProfile, MovePicker, Reaction,
        RecognitionResult, Recognizer, SummarySink,
    },
    context::SessionContext,
    error::RecognitionError,
    game::{self, Move, Outcome},
    phrases::{self, Phrase},
    streak,
    summary::SessionSummary,
    validator,
};
use chrono::{DateTime, Utc};
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Listening windows handed to the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenSettings {
    /// Window for the opening "do you want to play?" question.
    pub consent_timeout: Duration,
    /// Window for moves and "play again?".
    pub answer_timeout: Duration,
}

impl Default for ListenSettings {
    fn default() -> Self {
        Self {
            consent_timeout: Duration::from_secs(100),
            answer_timeout: Duration::from_secs(10),
        }
    }
}

/// The external collaborators a session talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub recognizer: Arc<dyn Recognizer>,
    pub actuator: Arc<dyn Actuator>,
    pub announcer: Arc<dyn Announcer>,
    pub summary_sink: Arc<dyn SummarySink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Welcome,
    ConsentGate,
    RoundLoop,
    SummaryAndExit,
}

/// What happened in a single played round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub user_move: Move,
    pub robot_move: Move,
    pub outcome: Outcome,
    /// The outcome was forced by the comeback override.
    pub comeback: bool,
    pub streak_reaction: Option<Reaction>,
}

/// Result of one pass through the round loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundPass {
    /// A pending reset was applied; no round was played.
    Reset,
    Played(RoundReport),
    /// The player no longer wants to play.
    Declined,
}

pub struct SessionController {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    state: SessionState,
    ctx: SessionContext,
    io: Collaborators,
    picker: Box<dyn MovePicker>,
    signals: mpsc::Receiver<ControlSignal>,
    settings: ListenSettings,
}

impl SessionController {
    pub fn new(
        io: Collaborators,
        picker: Box<dyn MovePicker>,
        signals: mpsc::Receiver<ControlSignal>,
        settings: ListenSettings,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            state: SessionState::Welcome,
            ctx: SessionContext::new(),
            io,
            picker,
            signals,
            settings,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Runs the session to completion and returns the summary that was
    /// handed to the summary sink.
    #[instrument(name = "rps_session", skip_all, fields(session_id = %self.session_id))]
    pub async fn run(mut self) -> SessionSummary {
        loop {
            debug!(state = ?self.state, "Entering state");
            match self.state {
                SessionState::Welcome => {
                    self.welcome().await;
                    self.state = SessionState::ConsentGate;
                }
                SessionState::ConsentGate => {
                    self.consent_gate().await;
                    self.state = SessionState::RoundLoop;
                }
                SessionState::RoundLoop => {
                    if self.round_pass().await == RoundPass::Declined {
                        self.state = SessionState::SummaryAndExit;
                    }
                }
                SessionState::SummaryAndExit => return self.finish().await,
            }
        }
    }

    async fn welcome(&mut self) {
        info!("Welcoming player");
        self.io.actuator.set_indicator(Indicator::ResetArmed).await;
        self.io.actuator.perform(Reaction::Intro).await;
    }

    async fn consent_gate(&mut self) {
        self.announce(Phrase::Play, &[]).await;
        if self.poll_signals() {
            info!("Consent given by quick-consent trigger");
            self.ctx.wants_to_play = true;
            self.ctx.invalid_input = false;
            return;
        }
        self.ask_consent(self.settings.consent_timeout).await;
        info!(wants_to_play = self.ctx.wants_to_play, "Consent answered");
    }

    /// Drains pending out-of-band signals. Returns true if a quick consent
    /// was among them.
    fn poll_signals(&mut self) -> bool {
        let mut quick_consent = false;
        while let Ok(signal) = self.signals.try_recv() {
            match signal {
                ControlSignal::Reset => {
                    info!("Reset requested");
                    self.ctx.reset_requested = true;
                }
                ControlSignal::QuickConsent => quick_consent = true,
            }
        }
        quick_consent
    }

    /// One pass of the round loop: apply a pending reset, or play a round and
    /// ask whether to continue.
    pub async fn round_pass(&mut self) -> RoundPass {
        if self.poll_signals() {
            debug!("Ignoring quick consent outside the opening question");
        }

        if self.ctx.reset_requested {
            self.announce(Phrase::Reset, &[]).await;
            self.ctx = SessionContext::after_reset();
            info!("Session context reset");
            return RoundPass::Reset;
        }

        if !self.ctx.wants_to_play {
            return RoundPass::Declined;
        }

        let report = self.play_round().await;

        self.announce(Phrase::PlayAgain, &[]).await;
        self.ask_consent(self.settings.answer_timeout).await;
        RoundPass::Played(report)
    }

    /// Plays a single round: pick, listen, resolve, react and count.
    pub async fn play_round(&mut self) -> RoundReport {
        self.announce(Phrase::LetsPlay, &[]).await;

        let robot_move = self.picker.pick();
        self.ctx.robot_choice = Some(robot_move);
        debug!(%robot_move, "Robot picked its move");
        self.io.actuator.perform(Reaction::StartGame).await;

        let user_move = self.collect_move().await;

        let comeback = self.ctx.comeback_due();
        let outcome = if comeback {
            info!(
                games_played = self.ctx.games_played,
                lost = self.ctx.tally.lost,
                won = self.ctx.tally.won,
                "Comeback override"
            );
            self.ctx.shown_special_event = true;
            self.io.actuator.perform(Reaction::Comeback).await;
            Outcome::Won
        } else {
            self.io.actuator.perform(Reaction::Reveal(robot_move)).await;
            game::resolve(user_move, robot_move)
        };

        self.announce(Phrase::for_outcome(outcome), &[]).await;
        self.ctx.record_outcome(outcome);

        let streak_reaction = streak::advance(&mut self.ctx, outcome);
        if let Some(reaction) = streak_reaction {
            self.io.actuator.perform(reaction).await;
        }

        info!(
            %user_move,
            %robot_move,
            ?outcome,
            seq_streak = self.ctx.seq_streak,
            games_played = self.ctx.games_played,
            "Round finished"
        );

        RoundReport {
            user_move,
            robot_move,
            outcome,
            comeback,
            streak_reaction,
        }
    }

    /// Asks yes/no until a valid answer arrives.
    async fn ask_consent(&mut self, timeout: Duration) {
        while self.attempt_consent(timeout).await.is_err() {
            self.announce(Phrase::DidNotGet, &[]).await;
        }
    }

    /// Asks for a move until a valid one arrives.
    async fn collect_move(&mut self) -> Move {
        loop {
            match self.attempt_move().await {
                Ok(user_move) => return user_move,
                Err(_) => self.announce(Phrase::DidNotGet, &[]).await,
            }
        }
    }

    /// A single consent question. On success the answer is stored in
    /// `wants_to_play`; on failure only `invalid_input` changes.
    pub async fn attempt_consent(&mut self, timeout: Duration) -> Result<bool, RecognitionError> {
        let heard = self.listen(IntentProfile::YesNo, timeout).await;
        let answer = validator::validate_consent(heard.as_ref());
        self.note_validation(&answer);
        if let Ok(wants) = answer {
            self.ctx.wants_to_play = wants;
        }
        answer
    }

    /// A single move question. On success the move is stored in `user_choice`.
    pub async fn attempt_move(&mut self) -> Result<Move, RecognitionError> {
        let heard = self.listen(IntentProfile::Moves, self.settings.answer_timeout).await;
        let answer = validator::validate_move(heard.as_ref());
        self.note_validation(&answer);
        if let Ok(user_move) = answer {
            self.ctx.user_choice = Some(user_move);
        }
        answer
    }

    fn note_validation<T>(&mut self, answer: &Result<T, RecognitionError>) {
        self.ctx.invalid_input = answer.is_err();
        if let Err(e) = answer {
            debug!(error = %e, "Answer rejected, asking again");
        }
    }

    async fn listen(&self, profile: IntentProfile, timeout: Duration) -> Option<RecognitionResult> {
        self.io.actuator.set_indicator(Indicator::Listening).await;
        let heard = match self.io.recognizer.recognize(profile, timeout).await {
            Ok(heard) => heard,
            Err(e) => {
                warn!(error = ?e, profile = profile.name(), "Recognition failed, treating as silence");
                None
            }
        };
        self.io.actuator.set_indicator(Indicator::Idle).await;
        debug!(profile = profile.name(), ?heard, "Recognition finished");
        heard
    }

    async fn announce(&self, phrase: Phrase, substitutions: &[(&str, String)]) {
        let text = phrase.render(substitutions);
        self.io.announcer.say(&text).await;
    }

    async fn finish(&mut self) -> SessionSummary {
        self.announce(Phrase::Okay, &[]).await;
        self.announce(Phrase::Score, &phrases::score_substitutions(&self.ctx.tally))
            .await;
        self.io.actuator.perform(Reaction::Farewell).await;

        let summary = SessionSummary::new(self.session_id, self.started_at, self.ctx.clone());
        match self.io.summary_sink.persist(&summary).await {
            Ok(location) => info!(%location, "Session summary saved"),
            Err(e) => warn!(error = ?e, "Failed to save session summary"),
        }

        self.io.recognizer.release().await;
        self.io.actuator.release().await;
        info!(
            games_played = self.ctx.games_played,
            won = self.ctx.tally.won,
            tie = self.ctx.tally.tie,
            lost = self.ctx.tally.lost,
            "Session finished"
        );
        summary
    }
}
