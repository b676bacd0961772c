use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::candidate_dto::{
        CandidateListQuery, CandidateListResponse, CandidateResponse, RegisterCandidatePayload,
        UpdateCandidateStatusPayload, UpdateSoftSkillsPayload,
    },
    error::Result,
    models::candidate::CANDIDATE_STATUSES,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/public/candidates",
    request_body = RegisterCandidatePayload,
    responses(
        (status = 201, description = "Candidate registered"),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email or phone already registered")
    )
)]
#[axum::debug_handler]
pub async fn register_candidate(
    State(state): State<AppState>,
    Json(payload): Json<RegisterCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state.candidate_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(CandidateResponse::from(candidate))))
}

#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.get(id).await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[utoipa::path(
    get,
    path = "/api/integration/candidates",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("location" = Option<String>, Query, description = "Filter by location"),
        ("search" = Option<String>, Query, description = "Search name/email")
    ),
    responses(
        (status = 200, description = "List of candidates")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidateListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.candidate_service.list(query).await?;
    Ok(Json(CandidateListResponse::from(result)))
}

#[axum::debug_handler]
pub async fn update_candidate_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCandidateStatusPayload>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .candidate_service
        .update_status(id, &payload.status)
        .await?;

    state
        .notification_service
        .enqueue_webhook(
            "candidate.status_changed",
            &serde_json::json!({
                "candidate_id": candidate.id,
                "status": candidate.status,
            }),
        )
        .await?;

    Ok(Json(CandidateResponse::from(candidate)))
}

/// A changed soft-skills rating feeds SRS, so recomputation is queued.
#[axum::debug_handler]
pub async fn set_soft_skills_rating(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSoftSkillsPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = state
        .candidate_service
        .set_soft_skills_rating(id, payload.rating)
        .await?;
    state
        .score_queue_service
        .enqueue(candidate.id, None, "soft_skills_updated")
        .await?;
    Ok(Json(CandidateResponse::from(candidate)))
}

#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.candidate_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn list_candidate_statuses() -> impl IntoResponse {
    Json(serde_json::json!({ "statuses": CANDIDATE_STATUSES }))
}
