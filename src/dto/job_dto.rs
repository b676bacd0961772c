use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::Job;
use crate::services::job_service::JobList;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    pub external_id: Option<String>,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub company: String,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
    pub weight_tms: Option<f64>,
    pub weight_srs: Option<f64>,
    pub weight_rns: Option<f64>,
    pub status: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    pub external_id: Option<String>,
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub nice_to_have_skills: Option<Vec<String>>,
    pub weight_tms: Option<f64>,
    pub weight_srs: Option<f64>,
    pub weight_rns: Option<f64>,
    pub status: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: uuid::Uuid,
    pub external_id: Option<String>,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub required_skills: Vec<String>,
    pub nice_to_have_skills: Vec<String>,
    pub weight_tms: f64,
    pub weight_srs: f64,
    pub weight_rns: f64,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPublicSummary {
    pub id: uuid::Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub required_skills: Vec<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<JobResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPublicListResponse {
    pub items: Vec<JobPublicSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub company: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobPublicQuery {
    pub limit: Option<i64>,
}

impl From<Job> for JobResponse {
    fn from(value: Job) -> Self {
        Self {
            id: value.id,
            external_id: value.external_id,
            title: value.title,
            company: value.company,
            location: value.location,
            description: value.description,
            required_skills: value.required_skills,
            nice_to_have_skills: value.nice_to_have_skills,
            weight_tms: value.weight_tms,
            weight_srs: value.weight_srs,
            weight_rns: value.weight_rns,
            status: value.status,
            published_at: value.published_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<Job> for JobPublicSummary {
    fn from(value: Job) -> Self {
        let summary = value.description.as_ref().map(|text| {
            let trimmed = text.trim();
            if trimmed.chars().count() > 320 {
                format!("{}…", trimmed.chars().take(320).collect::<String>())
            } else {
                trimmed.to_string()
            }
        });

        Self {
            id: value.id,
            title: value.title,
            company: value.company,
            location: value.location,
            summary,
            required_skills: value.required_skills,
            published_at: value.published_at,
        }
    }
}

impl From<JobList> for JobListResponse {
    fn from(value: JobList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
