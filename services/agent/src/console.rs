//! Console connector.
//!
//! Stands in for the robot and speech service: each line typed on stdin is a
//! recognized utterance, lines starting with `!` are button presses, and
//! everything the agent says or does is printed.

use anyhow::Result;
use async_trait::async_trait;
use rps_core::collaborators::{
    Actuator, Announcer, ControlSignal, Indicator, IntentProfile, Reaction, RecognitionResult,
    Recognizer,
};
use std::time::Duration;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

/// What a typed line means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Transcript(String),
    Signal(ControlSignal),
}

/// Classifies one line of console input.
pub fn classify_line(line: &str) -> ConsoleInput {
    match line.trim() {
        "!reset" => ConsoleInput::Signal(ControlSignal::Reset),
        "!yes" => ConsoleInput::Signal(ControlSignal::QuickConsent),
        text => ConsoleInput::Transcript(text.to_string()),
    }
}

pub struct ConsoleConnector {
    transcripts: Mutex<mpsc::Receiver<String>>,
    reader: JoinHandle<()>,
}

impl ConsoleConnector {
    /// Spawns the task that reads `input` line by line, routing button
    /// presses to `signals` and everything else to the recognizer.
    pub fn spawn<R>(input: R, signals: mpsc::Sender<ControlSignal>) -> Self
    where
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(32);
        let reader = tokio::spawn(async move {
            let mut lines = input.lines();
            loop {
                let line = match lines.next_line().await {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        info!("Console input closed");
                        break;
                    }
                    Err(e) => {
                        warn!(error = ?e, "Failed to read console input");
                        break;
                    }
                };
                let delivered = match classify_line(&line) {
                    ConsoleInput::Signal(signal) => {
                        debug!(?signal, "Button pressed");
                        signals.send(signal).await.is_ok()
                    }
                    ConsoleInput::Transcript(text) => tx.send(text).await.is_ok(),
                };
                if !delivered {
                    debug!("Session gone, stopping console reader");
                    break;
                }
            }
        });
        Self {
            transcripts: Mutex::new(rx),
            reader,
        }
    }

    /// Connects to the process's stdin.
    pub fn stdin(signals: mpsc::Sender<ControlSignal>) -> Self {
        Self::spawn(tokio::io::BufReader::new(tokio::io::stdin()), signals)
    }
}

#[async_trait]
impl Recognizer for ConsoleConnector {
    async fn recognize(
        &self,
        profile: IntentProfile,
        timeout: Duration,
    ) -> Result<Option<RecognitionResult>> {
        debug!(profile = profile.name(), ?timeout, "Listening");
        let mut transcripts = self.transcripts.lock().await;
        match tokio::time::timeout(timeout, transcripts.recv()).await {
            Ok(Some(text)) => Ok(Some(RecognitionResult::new(text))),
            Ok(None) => {
                // No more input will come; behave like a silent listening window.
                tokio::time::sleep(timeout).await;
                Ok(None)
            }
            Err(_) => Ok(None),
        }
    }

    async fn release(&self) {
        self.reader.abort();
    }
}

#[async_trait]
impl Announcer for ConsoleConnector {
    async fn say(&self, text: &str) {
        println!("robot> {text}");
    }
}

#[async_trait]
impl Actuator for ConsoleConnector {
    async fn perform(&self, reaction: Reaction) {
        info!(behavior = reaction.behavior_id(), "Performing reaction");
        println!("       [{}]", reaction.behavior_id());
    }

    async fn set_indicator(&self, indicator: Indicator) {
        match indicator {
            Indicator::Listening => println!("   you> "),
            Indicator::ResetArmed => println!("       (type !reset at any time to reset the scores)"),
            Indicator::Idle => {}
        }
    }
}
