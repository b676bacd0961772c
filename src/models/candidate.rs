use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const CANDIDATE_STATUSES: [&str; 5] =
    ["new", "reviewing", "shortlisted", "rejected", "interviewing"];

pub fn is_valid_candidate_status(status: &str) -> bool {
    CANDIDATE_STATUSES.contains(&status)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub soft_skills_rating: Option<i32>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
