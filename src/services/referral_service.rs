use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::referral_dto::SubmitReferralPayload;
use crate::error::{Error, Result};
use crate::models::referral::{Referral, REFERRAL_STATUS_SUBMITTED};
use crate::utils::token::generate_access_token;

const REFERRAL_COLUMNS: &str = "id, candidate_id, access_token, referrer_name, referrer_email, \
     relationship, strength, comment, status, created_at, submitted_at";

const ACCESS_TOKEN_LENGTH: usize = 32;

#[derive(Clone)]
pub struct ReferralService {
    pool: PgPool,
}

impl ReferralService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_invite(&self, candidate_id: Uuid) -> Result<Referral> {
        sqlx::query("SELECT id FROM candidates WHERE id = $1")
            .bind(candidate_id)
            .fetch_one(&self.pool)
            .await?;

        let token = generate_access_token(ACCESS_TOKEN_LENGTH);
        let referral = sqlx::query_as::<_, Referral>(&format!(
            r#"
            INSERT INTO referrals (candidate_id, access_token, status)
            VALUES ($1, $2, 'pending')
            RETURNING {}
            "#,
            REFERRAL_COLUMNS
        ))
        .bind(candidate_id)
        .bind(&token)
        .fetch_one(&self.pool)
        .await?;

        Ok(referral)
    }

    pub async fn get_by_token(&self, token: &str) -> Result<Referral> {
        let referral = sqlx::query_as::<_, Referral>(&format!(
            "SELECT {} FROM referrals WHERE access_token = $1",
            REFERRAL_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Referral link not found".to_string()))?;
        Ok(referral)
    }

    /// One submission per invite; a reused token is rejected.
    pub async fn submit_by_token(
        &self,
        token: &str,
        payload: SubmitReferralPayload,
    ) -> Result<Referral> {
        let referral = self.get_by_token(token).await?;
        if referral.status == REFERRAL_STATUS_SUBMITTED {
            return Err(Error::Conflict(
                "This referral has already been submitted".to_string(),
            ));
        }

        let referral = sqlx::query_as::<_, Referral>(&format!(
            r#"
            UPDATE referrals
            SET referrer_name = $1,
                referrer_email = $2,
                relationship = $3,
                strength = $4,
                comment = $5,
                status = 'submitted',
                submitted_at = NOW()
            WHERE id = $6
            RETURNING {}
            "#,
            REFERRAL_COLUMNS
        ))
        .bind(&payload.referrer_name)
        .bind(&payload.referrer_email)
        .bind(&payload.relationship)
        .bind(payload.strength)
        .bind(&payload.comment)
        .bind(referral.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(referral)
    }

    pub async fn list_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<Referral>> {
        let referrals = sqlx::query_as::<_, Referral>(&format!(
            "SELECT {} FROM referrals WHERE candidate_id = $1 ORDER BY created_at DESC",
            REFERRAL_COLUMNS
        ))
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(referrals)
    }

    pub async fn candidate_name(&self, candidate_id: Uuid) -> Result<String> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM candidates WHERE id = $1")
            .bind(candidate_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(name)
    }
}
