use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::fit_score::FitScore;
use crate::models::job::Job;
use crate::scoring::fit::{compute_fit, derive_rns, derive_srs, derive_tms};
use crate::scoring::ranking::{
    filter_candidates, sort_candidates, RankFilter, RankedCandidate, SortDir, SortKey,
};

const FIT_SCORE_COLUMNS: &str = "id, candidate_id, job_id, version, tms, srs, rns, overall, \
     confidence, tms_explanation, srs_explanation, rns_explanation, computed_at";

#[derive(Clone)]
pub struct FitScoreService {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct RankedRow {
    candidate_id: Uuid,
    name: String,
    location: Option<String>,
    skills: Vec<String>,
    status: String,
    created_at: Option<DateTime<Utc>>,
    overall: Option<i32>,
    confidence: Option<String>,
}

impl From<RankedRow> for RankedCandidate {
    fn from(row: RankedRow) -> Self {
        Self {
            candidate_id: row.candidate_id,
            name: row.name,
            location: row.location,
            skills: row.skills,
            status: row.status,
            overall: row.overall,
            confidence: row.confidence,
            created_at: row.created_at,
        }
    }
}

impl FitScoreService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn latest_for_pair(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<FitScore>> {
        let score = sqlx::query_as::<_, FitScore>(&format!(
            r#"
            SELECT {} FROM fit_scores
            WHERE candidate_id = $1 AND job_id = $2
            ORDER BY version DESC
            LIMIT 1
            "#,
            FIT_SCORE_COLUMNS
        ))
        .bind(candidate_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(score)
    }

    pub async fn history_for_pair(
        &self,
        candidate_id: Uuid,
        job_id: Uuid,
    ) -> Result<Vec<FitScore>> {
        let scores = sqlx::query_as::<_, FitScore>(&format!(
            r#"
            SELECT {} FROM fit_scores
            WHERE candidate_id = $1 AND job_id = $2
            ORDER BY version DESC
            "#,
            FIT_SCORE_COLUMNS
        ))
        .bind(candidate_id)
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(scores)
    }

    /// Recompute the pair and append the next score version. Inputs are
    /// read fresh from the candidate, the job and submitted referrals.
    pub async fn recompute_pair(&self, candidate_id: Uuid, job_id: Uuid) -> Result<FitScore> {
        let candidate = sqlx::query_as::<_, crate::models::candidate::Candidate>(
            "SELECT id, name, email, phone, location, skills, soft_skills_rating, status, created_at, updated_at FROM candidates WHERE id = $1",
        )
        .bind(candidate_id)
        .fetch_one(&self.pool)
        .await?;

        let job = sqlx::query_as::<_, Job>(
            "SELECT id, external_id, title, company, location, description, required_skills, \
             nice_to_have_skills, weight_tms, weight_srs, weight_rns, status, published_at, \
             created_at, updated_at FROM jobs WHERE id = $1",
        )
        .bind(job_id)
        .fetch_one(&self.pool)
        .await?;

        let weights = job.weights();
        weights
            .validate()
            .map_err(|e| Error::Internal(format!("Job {} has invalid weights: {}", job.id, e)))?;

        let strengths = sqlx::query_scalar::<_, i32>(
            "SELECT COALESCE(strength, 1) FROM referrals WHERE candidate_id = $1 AND status = 'submitted'",
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        let tms = derive_tms(
            &job.required_skills,
            &job.nice_to_have_skills,
            &candidate.skills,
        );
        let srs = derive_srs(candidate.soft_skills_rating);
        let rns = derive_rns(&strengths);
        let fit = compute_fit(&tms, &srs, &rns, &weights);

        let score = sqlx::query_as::<_, FitScore>(&format!(
            r#"
            INSERT INTO fit_scores (
                candidate_id, job_id, version, tms, srs, rns, overall,
                confidence, tms_explanation, srs_explanation, rns_explanation
            )
            SELECT $1, $2, COALESCE(MAX(version), 0) + 1, $3, $4, $5, $6, $7, $8, $9, $10
            FROM fit_scores
            WHERE candidate_id = $1 AND job_id = $2
            RETURNING {}
            "#,
            FIT_SCORE_COLUMNS
        ))
        .bind(candidate_id)
        .bind(job_id)
        .bind(fit.tms.value)
        .bind(fit.srs.value)
        .bind(fit.rns.value)
        .bind(fit.overall)
        .bind(fit.confidence.as_str())
        .bind(&fit.tms.explanation)
        .bind(&fit.srs.explanation)
        .bind(&fit.rns.explanation)
        .fetch_one(&self.pool)
        .await?;

        Ok(score)
    }

    /// Recompute the candidate against every open job, e.g. after a new
    /// referral lands.
    pub async fn recompute_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<FitScore>> {
        let job_ids =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM jobs WHERE status = 'open'")
                .fetch_all(&self.pool)
                .await?;

        let mut scores = Vec::with_capacity(job_ids.len());
        for job_id in job_ids {
            scores.push(self.recompute_pair(candidate_id, job_id).await?);
        }
        Ok(scores)
    }

    /// All candidates with their latest score for the job, filtered and
    /// sorted in memory.
    pub async fn rank_for_job(
        &self,
        job_id: Uuid,
        filter: &RankFilter,
        sort: SortKey,
        dir: SortDir,
    ) -> Result<Vec<RankedCandidate>> {
        // 404 before ranking an unknown job.
        sqlx::query("SELECT id FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, RankedRow>(
            r#"
            SELECT
                c.id AS candidate_id, c.name, c.location, c.skills, c.status, c.created_at,
                f.overall, f.confidence
            FROM candidates c
            LEFT JOIN LATERAL (
                SELECT overall, confidence
                FROM fit_scores
                WHERE candidate_id = c.id AND job_id = $1
                ORDER BY version DESC
                LIMIT 1
            ) f ON TRUE
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        let mut ranked = filter_candidates(rows.into_iter().map(Into::into).collect(), filter);
        sort_candidates(&mut ranked, sort, dir);
        Ok(ranked)
    }

    /// Latest score per candidate for one job, keyed by candidate, for the
    /// XLSX export.
    pub async fn latest_scores_for_job(
        &self,
        job_id: Uuid,
    ) -> Result<std::collections::HashMap<Uuid, FitScore>> {
        let scores = sqlx::query_as::<_, FitScore>(&format!(
            r#"
            SELECT DISTINCT ON (candidate_id) {}
            FROM fit_scores
            WHERE job_id = $1
            ORDER BY candidate_id, version DESC
            "#,
            FIT_SCORE_COLUMNS
        ))
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(scores.into_iter().map(|s| (s.candidate_id, s)).collect())
    }
}
