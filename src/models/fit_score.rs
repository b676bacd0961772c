use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One computed score version for a (candidate, job) pair. Rows are
/// append-only; recomputation inserts the next `version`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FitScore {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub version: i32,
    pub tms: i32,
    pub srs: i32,
    pub rns: i32,
    pub overall: i32,
    pub confidence: String,
    pub tms_explanation: String,
    pub srs_explanation: String,
    pub rns_explanation: String,
    pub computed_at: Option<DateTime<Utc>>,
}
