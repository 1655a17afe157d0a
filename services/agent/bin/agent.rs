//! Main Entrypoint for the Rock–Paper–Scissors Agent
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment and command line.
//! 2. Initializing logging.
//! 3. Starting the connector and summary storage.
//! 4. Running one game session until the player stops or presses Ctrl+C.

use anyhow::Context;
use clap::Parser;
use rps_agent::{config::Config, console::ConsoleConnector, summary_store::FileSummaryStore};
use rps_core::{
    Collaborators, SessionController,
    collaborators::{MovePicker, RandomPicker},
};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(version, about = "Play rock, paper, scissors with the agent")]
struct Cli {
    /// Directory for session summaries (overrides RESULTS_DIR).
    #[arg(long)]
    results_dir: Option<PathBuf>,
    /// Seed for the robot's moves (overrides RPS_SEED).
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let cli = Cli::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(dir) = cli.results_dir {
        config.results_dir = dir;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    // --- 2. Initialize Logging ---
    // Logs go to stderr so they do not interleave with the conversation.
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
    info!(results_dir = %config.results_dir.display(), seed = ?config.seed, "Configuration loaded");

    // --- 3. Start Collaborators ---
    let (signal_tx, signal_rx) = mpsc::channel(16);
    let console = Arc::new(ConsoleConnector::stdin(signal_tx));
    let store = Arc::new(FileSummaryStore::new(&config.results_dir));
    let picker: Box<dyn MovePicker> = match config.seed {
        Some(seed) => Box::new(RandomPicker::seeded(seed)),
        None => Box::new(RandomPicker::new()),
    };

    let io = Collaborators {
        recognizer: console.clone(),
        actuator: console.clone(),
        announcer: console,
        summary_sink: store,
    };
    let controller = SessionController::new(io, picker, signal_rx, config.listen_settings());
    info!(session_id = %controller.session_id(), "Session starting");

    // --- 4. Run the Session ---
    tokio::select! {
        summary = controller.run() => {
            info!(
                games_played = summary.context.games_played,
                won = summary.context.tally.won,
                lost = summary.context.tally.lost,
                tie = summary.context.tally.tie,
                "Session complete"
            );
        }
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl+C")?;
            warn!("Interrupted; session abandoned without a summary");
        }
    }

    Ok(())
}
