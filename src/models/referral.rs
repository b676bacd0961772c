use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const REFERRAL_STATUS_PENDING: &str = "pending";
pub const REFERRAL_STATUS_SUBMITTED: &str = "submitted";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Referral {
    pub id: Uuid,
    pub candidate_id: Uuid,
    #[serde(skip_serializing)]
    pub access_token: String,
    pub referrer_name: Option<String>,
    pub referrer_email: Option<String>,
    pub relationship: Option<String>,
    pub strength: Option<i32>,
    pub comment: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
}
