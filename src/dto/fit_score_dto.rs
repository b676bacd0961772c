use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::fit_score::FitScore;
use crate::scoring::ranking::{RankedCandidate, SortDir, SortKey};
use crate::scoring::weights::ScoreWeights;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitScoreResponse {
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputePayload {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnqueueScoreEventPayload {
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub reason: Option<String>,
}

/// Stateless score computation from raw sub-scores; nothing is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PreviewFitPayload {
    pub tms: Option<i32>,
    pub srs: Option<i32>,
    pub rns: Option<i32>,
    pub weights: Option<ScoreWeights>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RankQuery {
    pub status: Option<String>,
    pub min_overall: Option<i32>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub dir: Option<SortDir>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidateResponse {
    pub candidate_id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub status: String,
    pub overall: Option<i32>,
    pub confidence: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedListResponse {
    pub job_id: Uuid,
    pub items: Vec<RankedCandidateResponse>,
}

impl From<FitScore> for FitScoreResponse {
    fn from(value: FitScore) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            job_id: value.job_id,
            version: value.version,
            tms: value.tms,
            srs: value.srs,
            rns: value.rns,
            overall: value.overall,
            confidence: value.confidence,
            tms_explanation: value.tms_explanation,
            srs_explanation: value.srs_explanation,
            rns_explanation: value.rns_explanation,
            computed_at: value.computed_at,
        }
    }
}

impl From<RankedCandidate> for RankedCandidateResponse {
    fn from(value: RankedCandidate) -> Self {
        Self {
            candidate_id: value.candidate_id,
            name: value.name,
            location: value.location,
            skills: value.skills,
            status: value.status,
            overall: value.overall,
            confidence: value.confidence,
            created_at: value.created_at,
        }
    }
}
