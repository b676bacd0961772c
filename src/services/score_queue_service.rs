use serde_json::json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::Result;
use crate::models::score_event::ScoreEvent;

const SCORE_EVENT_COLUMNS: &str =
    "id, candidate_id, job_id, reason, status, error, created_at, started_at, finished_at";

#[derive(Clone)]
pub struct ScoreQueueService {
    pub pool: PgPool,
}

impl ScoreQueueService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn enqueue(
        &self,
        candidate_id: Uuid,
        job_id: Option<Uuid>,
        reason: &str,
    ) -> Result<Uuid> {
        let row = sqlx::query(
            r#"
            INSERT INTO score_events (candidate_id, job_id, reason)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(candidate_id)
        .bind(job_id)
        .bind(reason)
        .fetch_one(&self.pool)
        .await?;
        let id: Uuid = row.try_get("id")?;
        Ok(id)
    }

    pub async fn get(&self, id: Uuid) -> Result<ScoreEvent> {
        let event = sqlx::query_as::<_, ScoreEvent>(&format!(
            "SELECT {} FROM score_events WHERE id = $1",
            SCORE_EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(event)
    }

    /// Claim and process one pending event. Returns false when the queue
    /// is empty so the worker loop can idle.
    pub async fn run_once(&self, state: &crate::AppState) -> Result<bool> {
        let rec = sqlx::query(
            r#"
            UPDATE score_events SET status = 'running', started_at = NOW()
            WHERE id = (
                SELECT id FROM score_events WHERE status = 'pending'
                ORDER BY created_at ASC
                FOR UPDATE SKIP LOCKED
                LIMIT 1
            )
            RETURNING id, candidate_id, job_id, reason
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = rec else { return Ok(false) };
        let event_id: Uuid = row.try_get("id")?;
        let candidate_id: Uuid = row.try_get("candidate_id")?;
        let job_id: Option<Uuid> = row.try_get("job_id")?;
        let reason: String = row.try_get("reason")?;

        let outcome = match job_id {
            Some(job_id) => state
                .fit_score_service
                .recompute_pair(candidate_id, job_id)
                .await
                .map(|score| vec![score]),
            None => {
                state
                    .fit_score_service
                    .recompute_for_candidate(candidate_id)
                    .await
            }
        };

        match outcome {
            Ok(scores) => {
                sqlx::query(
                    "UPDATE score_events SET status = 'succeeded', finished_at = NOW() WHERE id = $1",
                )
                .bind(event_id)
                .execute(&self.pool)
                .await?;

                let payload = json!({
                    "event_id": event_id,
                    "candidate_id": candidate_id,
                    "reason": reason,
                    "scores": scores
                        .iter()
                        .map(|s| {
                            json!({
                                "job_id": s.job_id,
                                "version": s.version,
                                "overall": s.overall,
                                "confidence": s.confidence,
                            })
                        })
                        .collect::<Vec<_>>(),
                });
                state
                    .notification_service
                    .enqueue_webhook("fit_score.recomputed", &payload)
                    .await?;
            }
            Err(e) => {
                tracing::error!(error = ?e, event_id = %event_id, "Score recompute failed");
                sqlx::query(
                    "UPDATE score_events SET status = 'failed', error = $1, finished_at = NOW() WHERE id = $2",
                )
                .bind(e.to_string())
                .bind(event_id)
                .execute(&self.pool)
                .await?;
            }
        }

        Ok(true)
    }
}
