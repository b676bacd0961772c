use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::scoring::weights::ScoreWeights;

pub const JOB_STATUSES: [&str; 3] = ["open", "paused", "closed"];

pub fn is_valid_job_status(status: &str) -> bool {
    JOB_STATUSES.contains(&status)
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
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

impl Job {
    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            tms: self.weight_tms,
            srs: self.weight_srs,
            rns: self.weight_rns,
        }
    }
}
