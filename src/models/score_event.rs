use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Queued recomputation request. `job_id = NULL` recomputes the candidate
/// against every open job.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScoreEvent {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub reason: String,
    pub status: String,
    pub error: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}
