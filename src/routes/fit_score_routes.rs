use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::fit_score_dto::{
        EnqueueScoreEventPayload, FitScoreResponse, PreviewFitPayload, RankQuery,
        RankedCandidateResponse, RankedListResponse, RecomputePayload,
    },
    error::{Error, Result},
    scoring::fit::{compute_fit, SubScoreInput},
    scoring::ranking::RankFilter,
    AppState,
};

#[axum::debug_handler]
pub async fn get_latest_fit_score(
    State(state): State<AppState>,
    Path((candidate_id, job_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    let score = state
        .fit_score_service
        .latest_for_pair(candidate_id, job_id)
        .await?
        .ok_or_else(|| Error::NotFound("No fit score computed for this pair yet".to_string()))?;
    Ok(Json(FitScoreResponse::from(score)))
}

#[axum::debug_handler]
pub async fn get_fit_score_history(
    State(state): State<AppState>,
    Path((candidate_id, job_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    let scores = state
        .fit_score_service
        .history_for_pair(candidate_id, job_id)
        .await?;
    let items: Vec<FitScoreResponse> = scores.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[utoipa::path(
    post,
    path = "/api/integration/fit-scores/recompute",
    request_body = RecomputePayload,
    responses(
        (status = 201, description = "New score version computed"),
        (status = 404, description = "Candidate or job not found")
    )
)]
#[axum::debug_handler]
pub async fn recompute_fit_score(
    State(state): State<AppState>,
    Json(payload): Json<RecomputePayload>,
) -> Result<impl IntoResponse> {
    let score = state
        .fit_score_service
        .recompute_pair(payload.candidate_id, payload.job_id)
        .await?;
    Ok((StatusCode::CREATED, Json(FitScoreResponse::from(score))))
}

#[axum::debug_handler]
pub async fn enqueue_score_event(
    State(state): State<AppState>,
    Json(payload): Json<EnqueueScoreEventPayload>,
) -> Result<impl IntoResponse> {
    // fail fast on an unknown candidate instead of a dead queue entry
    state.candidate_service.get(payload.candidate_id).await?;

    let reason = payload.reason.unwrap_or_else(|| "manual".to_string());
    let id = state
        .score_queue_service
        .enqueue(payload.candidate_id, payload.job_id, &reason)
        .await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "event_id": id })),
    ))
}

#[axum::debug_handler]
pub async fn get_score_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let event = state.score_queue_service.get(id).await?;
    Ok(Json(event))
}

#[axum::debug_handler]
pub async fn rank_candidates_for_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Query(query): Query<RankQuery>,
) -> Result<impl IntoResponse> {
    let filter = RankFilter {
        status: query.status,
        min_overall: query.min_overall,
        search: query.search,
    };
    let ranked = state
        .fit_score_service
        .rank_for_job(
            job_id,
            &filter,
            query.sort.unwrap_or_default(),
            query.dir.unwrap_or_default(),
        )
        .await?;
    let items: Vec<RankedCandidateResponse> = ranked.into_iter().map(Into::into).collect();
    Ok(Json(RankedListResponse { job_id, items }))
}

/// Compute a score from raw sub-scores without touching any stored data.
#[axum::debug_handler]
pub async fn preview_fit_score(
    State(_state): State<AppState>,
    Json(payload): Json<PreviewFitPayload>,
) -> Result<impl IntoResponse> {
    let weights = payload
        .weights
        .unwrap_or(crate::config::get_config().default_weights);
    weights.validate().map_err(Error::BadRequest)?;

    let tms = sub_score(payload.tms, "Technical match score supplied directly");
    let srs = sub_score(payload.srs, "Soft-skills score supplied directly");
    let rns = sub_score(payload.rns, "Referral network score supplied directly");
    let fit = compute_fit(&tms, &srs, &rns, &weights);
    Ok(Json(fit))
}

fn sub_score(value: Option<i32>, explanation: &str) -> SubScoreInput {
    match value {
        Some(v) => SubScoreInput::known(v, explanation),
        None => SubScoreInput::unknown("Not supplied"),
    }
}
