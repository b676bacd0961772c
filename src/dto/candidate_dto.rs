use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::Candidate;
use crate::services::candidate_service::CandidateList;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterCandidatePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCandidateStatusPayload {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSoftSkillsPayload {
    #[validate(range(min = 0, max = 100))]
    pub rating: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResponse {
    pub id: uuid::Uuid,
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateListResponse {
    pub items: Vec<CandidateResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CandidateListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntakeDay {
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStatsResponse {
    pub total_candidates: i64,
    pub status_counts: HashMap<String, i64>,
    pub intake_history: Vec<IntakeDay>,
    pub open_jobs: i64,
}

impl From<Candidate> for CandidateResponse {
    fn from(value: Candidate) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            location: value.location,
            skills: value.skills,
            soft_skills_rating: value.soft_skills_rating,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<CandidateList> for CandidateListResponse {
    fn from(value: CandidateList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
