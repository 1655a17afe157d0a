use rps_core::ListenSettings;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory the session summaries are written to.
    pub results_dir: PathBuf,
    pub consent_timeout: Duration,
    pub answer_timeout: Duration,
    pub log_level: Level,
    /// Fixes the robot's move sequence when set.
    pub seed: Option<u64>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let results_dir = std::env::var("RESULTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./results"));

        let consent_timeout = Duration::from_secs(secs_var("CONSENT_LISTEN_SECS", 100)?);
        let answer_timeout = Duration::from_secs(secs_var("MOVE_LISTEN_SECS", 10)?);

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let seed = match std::env::var("RPS_SEED") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|e| ConfigError::InvalidValue("RPS_SEED".to_string(), e.to_string()))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            results_dir,
            consent_timeout,
            answer_timeout,
            log_level,
            seed,
        })
    }

    pub fn listen_settings(&self) -> ListenSettings {
        ListenSettings {
            consent_timeout: self.consent_timeout,
            answer_timeout: self.answer_timeout,
        }
    }
}

fn secs_var(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => {
            let secs = raw
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue(
                    name.to_string(),
                    "listening window must be at least one second".to_string(),
                ));
            }
            Ok(secs)
        }
        Err(_) => Ok(default),
    }
}
