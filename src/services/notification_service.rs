use reqwest::Client;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::Result;
use crate::models::webhook_log::WebhookLog;
use crate::utils::signature::sign_payload;

const WEBHOOK_LOG_COLUMNS: &str = "id, event_type, payload, target_url, http_status, \
     response_body, attempts, max_attempts, next_retry_at, status, created_at, updated_at";

pub const SIGNATURE_HEADER: &str = "X-TalentFit-Signature";
pub const EVENT_HEADER: &str = "X-TalentFit-Event";

#[derive(Clone)]
pub struct NotificationService {
    pool: PgPool,
    client: Client,
    target_url: Option<String>,
}

impl NotificationService {
    pub fn new(pool: PgPool, target_url: Option<String>) -> Self {
        Self {
            pool,
            client: Client::new(),
            target_url,
        }
    }

    /// Queue an outbound event. Without a configured target this is a
    /// logged no-op rather than a silent drop.
    pub async fn enqueue_webhook(
        &self,
        event_type: &str,
        payload: &JsonValue,
    ) -> Result<Option<WebhookLog>> {
        let Some(target_url) = self.target_url.as_deref() else {
            tracing::debug!(event_type, "No ATS webhook target configured, skipping event");
            return Ok(None);
        };

        let log = sqlx::query_as::<_, WebhookLog>(&format!(
            r#"
            INSERT INTO webhook_logs (event_type, payload, target_url, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING {}
            "#,
            WEBHOOK_LOG_COLUMNS
        ))
        .bind(event_type)
        .bind(payload)
        .bind(target_url)
        .fetch_one(&self.pool)
        .await?;
        Ok(Some(log))
    }

    async fn deliver_once(&self, log_id: Uuid) -> Result<()> {
        let log = sqlx::query_as::<_, WebhookLog>(&format!(
            "SELECT {} FROM webhook_logs WHERE id = $1",
            WEBHOOK_LOG_COLUMNS
        ))
        .bind(log_id)
        .fetch_one(&self.pool)
        .await?;

        let body = serde_json::to_vec(&log.payload)?;
        let signature = sign_payload(&crate::config::get_config().webhook_secret, &body);

        let res = self
            .client
            .post(&log.target_url)
            .header("content-type", "application/json")
            .header(EVENT_HEADER, &log.event_type)
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await;

        match res {
            Ok(resp) => {
                let status = resp.status().as_u16() as i32;
                let body = resp.text().await.unwrap_or_default();
                sqlx::query(
                    r#"
                    UPDATE webhook_logs
                    SET http_status = $1, response_body = $2,
                        status = CASE WHEN $1 BETWEEN 200 AND 299 THEN 'success' ELSE 'failed' END,
                        attempts = COALESCE(attempts, 0) + 1, updated_at = NOW()
                    WHERE id = $3
                    "#,
                )
                .bind(status)
                .bind(body)
                .bind(log.id)
                .execute(&self.pool)
                .await?;
            }
            Err(err) => {
                sqlx::query(
                    r#"
                    UPDATE webhook_logs
                    SET response_body = $1, status = 'failed',
                        attempts = COALESCE(attempts, 0) + 1, updated_at = NOW()
                    WHERE id = $2
                    "#,
                )
                .bind(err.to_string())
                .bind(log.id)
                .execute(&self.pool)
                .await?;
            }
        }
        Ok(())
    }

    /// Deliver one due webhook; failed deliveries go back to pending with
    /// exponential backoff until max_attempts is exhausted.
    pub async fn run_once(&self) -> Result<bool> {
        let rec = sqlx::query(
            r#"
            UPDATE webhook_logs SET status = 'delivering', updated_at = NOW()
            WHERE id = (
                SELECT id FROM webhook_logs
                WHERE status = 'pending'
                  AND (next_retry_at IS NULL OR next_retry_at <= NOW())
                ORDER BY created_at ASC
                FOR UPDATE SKIP LOCKED
                LIMIT 1
            )
            RETURNING id
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = rec else { return Ok(false) };
        let id: Uuid = row.try_get("id")?;

        let _ = self.deliver_once(id).await;

        let row = sqlx::query("SELECT attempts, max_attempts, status FROM webhook_logs WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        let attempts: i32 = row.try_get::<Option<i32>, _>("attempts")?.unwrap_or(0);
        let max_attempts: i32 = row.try_get::<Option<i32>, _>("max_attempts")?.unwrap_or(3);
        let status: String = row.try_get("status")?;

        if status == "failed" && attempts < max_attempts {
            sqlx::query(
                r#"
                UPDATE webhook_logs
                SET status = 'pending',
                    next_retry_at = NOW() + make_interval(secs => LEAST(3600, 30 * power(2::float, GREATEST(0, attempts - 1))::int))
                WHERE id = $1
                "#,
            )
            .bind(id)
            .execute(&self.pool)
            .await?;
        } else if status == "delivering" {
            // deliver_once errored before recording an outcome
            sqlx::query("UPDATE webhook_logs SET status = 'failed', updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
        }

        Ok(true)
    }
}
