use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shortlist {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShortlistEntry {
    pub id: i32,
    pub shortlist_id: Uuid,
    pub candidate_id: Uuid,
    pub note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
