use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::referral::Referral;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReferralInvitePayload {
    pub candidate_id: Uuid,
}

/// The only response that carries the access token; it is handed to the
/// referrer out of band and never listed again.
#[derive(Debug, Clone, Serialize)]
pub struct ReferralInviteResponse {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub access_token: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitReferralPayload {
    #[validate(length(min = 1))]
    pub referrer_name: String,
    #[validate(email)]
    pub referrer_email: String,
    pub relationship: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub strength: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferralResponse {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub referrer_name: Option<String>,
    pub referrer_email: Option<String>,
    pub relationship: Option<String>,
    pub strength: Option<i32>,
    pub comment: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
}

/// What a referrer opening their link is allowed to see.
#[derive(Debug, Clone, Serialize)]
pub struct ReferralPublicView {
    pub candidate_name: String,
    pub status: String,
}

impl From<Referral> for ReferralInviteResponse {
    fn from(value: Referral) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            access_token: value.access_token,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

impl From<Referral> for ReferralResponse {
    fn from(value: Referral) -> Self {
        Self {
            id: value.id,
            candidate_id: value.candidate_id,
            referrer_name: value.referrer_name,
            referrer_email: value.referrer_email,
            relationship: value.relationship,
            strength: value.strength,
            comment: value.comment,
            status: value.status,
            created_at: value.created_at,
            submitted_at: value.submitted_at,
        }
    }
}
