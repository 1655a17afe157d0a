//! The record persisted when a session ends.

use crate::context::SessionContext;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The record written out when a session ends, kept for offline analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub context: SessionContext,
}

impl SessionSummary {
    pub fn new(session_id: Uuid, started_at: DateTime<Utc>, context: SessionContext) -> Self {
        Self {
            session_id,
            started_at,
            finished_at: Utc::now(),
            context,
        }
    }
}
