//! Summary Storage
//!
//! Writes each finished session to its own JSON file so results can be
//! collected for offline analysis.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rps_core::{collaborators::SummarySink, summary::SessionSummary};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Stores summaries as `advanced-<unix-micros>-<session-id>-results.json` in a
/// directory. Existing files are never overwritten.
#[derive(Clone, Debug)]
pub struct FileSummaryStore {
    dir: PathBuf,
}

impl FileSummaryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a summary is written to.
    pub fn path_for(&self, summary: &SessionSummary) -> PathBuf {
        self.dir.join(format!(
            "advanced-{}-{}-results.json",
            summary.finished_at.timestamp_micros(),
            summary.session_id
        ))
    }
}

#[async_trait]
impl SummarySink for FileSummaryStore {
    async fn persist(&self, summary: &SessionSummary) -> Result<String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create results directory {}", self.dir.display()))?;

        let path = self.path_for(summary);
        let json = serde_json::to_string_pretty(summary)?;
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to create summary file {}", path.display()))?;
        file.write_all(json.as_bytes())
            .await
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
        file.flush().await?;

        debug!(path = %path.display(), "Summary written");
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rps_core::{context::SessionContext, game::Outcome};
    use uuid::Uuid;

    fn summary() -> SessionSummary {
        let mut context = SessionContext::new();
        context.record_outcome(Outcome::Won);
        context.record_outcome(Outcome::Tie);
        SessionSummary {
            session_id: Uuid::new_v4(),
            started_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            finished_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            context,
        }
    }

    #[tokio::test]
    async fn test_persist_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSummaryStore::new(dir.path().join("results"));
        let summary = summary();

        let location = store.persist(&summary).await.unwrap();

        let expected = dir.path().join("results").join(format!(
            "advanced-{}-{}-results.json",
            1_705_314_600_000_000i64, summary.session_id
        ));
        assert_eq!(location, expected.display().to_string());

        let written = std::fs::read_to_string(&expected).unwrap();
        let parsed: SessionSummary = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, summary);
        assert_eq!(parsed.context.games_played, 2);
    }

    #[tokio::test]
    async fn test_sessions_finishing_in_the_same_second_keep_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSummaryStore::new(dir.path());
        let second = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        let mut early = summary();
        early.finished_at = second + chrono::Duration::milliseconds(100);
        let mut late = summary();
        late.finished_at = second + chrono::Duration::milliseconds(700);

        let first = store.persist(&early).await.unwrap();
        let other = store.persist(&late).await.unwrap();

        assert_ne!(first, other);
        let files = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 2);
    }

    #[tokio::test]
    async fn test_persist_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSummaryStore::new(dir.path());
        let summary = summary();

        store.persist(&summary).await.unwrap();
        let err = store.persist(&summary).await.unwrap_err();

        assert!(err.to_string().contains("Failed to create summary file"));
        let written = std::fs::read_to_string(store.path_for(&summary)).unwrap();
        let parsed: SessionSummary = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, summary);
    }

    #[tokio::test]
    async fn test_persist_reports_unwritable_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "occupied").unwrap();
        let store = FileSummaryStore::new(&blocker);

        let err = store.persist(&summary()).await.unwrap_err();
        assert!(err.to_string().contains("results directory"));
    }
}
