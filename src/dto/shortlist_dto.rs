use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::shortlist::Shortlist;
use crate::services::shortlist_service::{EntryWithCandidate, ShortlistDetail};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShortlistPayload {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddShortlistEntryPayload {
    pub candidate_id: Uuid,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortlistEntryResponse {
    pub id: i32,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_status: String,
    pub note: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortlistDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub entries: Vec<ShortlistEntryResponse>,
}

impl From<Shortlist> for ShortlistResponse {
    fn from(value: Shortlist) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            created_at: value.created_at,
        }
    }
}

impl From<EntryWithCandidate> for ShortlistEntryResponse {
    fn from(value: EntryWithCandidate) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            candidate_name: value.candidate_name,
            candidate_status: value.candidate_status,
            note: value.note,
            created_at: value.created_at,
        }
    }
}

impl From<ShortlistDetail> for ShortlistDetailResponse {
    fn from(value: ShortlistDetail) -> Self {
        Self {
            id: value.shortlist.id,
            name: value.shortlist.name,
            description: value.shortlist.description,
            created_at: value.shortlist.created_at,
            entries: value.entries.into_iter().map(Into::into).collect(),
        }
    }
}
