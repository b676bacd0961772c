use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::referral_dto::{
        CreateReferralInvitePayload, ReferralInviteResponse, ReferralPublicView, ReferralResponse,
        SubmitReferralPayload,
    },
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn create_referral_invite(
    State(state): State<AppState>,
    Json(payload): Json<CreateReferralInvitePayload>,
) -> Result<impl IntoResponse> {
    let referral = state
        .referral_service
        .create_invite(payload.candidate_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ReferralInviteResponse::from(referral)),
    ))
}

#[axum::debug_handler]
pub async fn list_candidate_referrals(
    State(state): State<AppState>,
    Path(candidate_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let referrals = state
        .referral_service
        .list_for_candidate(candidate_id)
        .await?;
    let items: Vec<ReferralResponse> = referrals.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn get_referral_by_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse> {
    let referral = state.referral_service.get_by_token(&token).await?;
    let candidate_name = state
        .referral_service
        .candidate_name(referral.candidate_id)
        .await?;
    Ok(Json(ReferralPublicView {
        candidate_name,
        status: referral.status,
    }))
}

/// A submitted referral changes RNS inputs, so recomputation against all
/// open jobs is queued before responding.
#[axum::debug_handler]
pub async fn submit_referral(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(payload): Json<SubmitReferralPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let referral = state
        .referral_service
        .submit_by_token(&token, payload)
        .await?;
    state
        .score_queue_service
        .enqueue(referral.candidate_id, None, "referral_submitted")
        .await?;
    Ok(Json(ReferralResponse::from(referral)))
}
