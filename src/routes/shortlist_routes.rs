use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::shortlist_dto::{
        AddShortlistEntryPayload, CreateShortlistPayload, ShortlistDetailResponse,
        ShortlistResponse,
    },
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn create_shortlist(
    State(state): State<AppState>,
    Json(payload): Json<CreateShortlistPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let shortlist = state
        .shortlist_service
        .create(&payload.name, payload.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ShortlistResponse::from(shortlist))))
}

#[axum::debug_handler]
pub async fn list_shortlists(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let shortlists = state.shortlist_service.list().await?;
    let items: Vec<ShortlistResponse> = shortlists.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

#[axum::debug_handler]
pub async fn get_shortlist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let detail = state.shortlist_service.get_detail(id).await?;
    Ok(Json(ShortlistDetailResponse::from(detail)))
}

#[axum::debug_handler]
pub async fn delete_shortlist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.shortlist_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn add_shortlist_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddShortlistEntryPayload>,
) -> Result<impl IntoResponse> {
    let entry = state
        .shortlist_service
        .add_candidate(id, payload.candidate_id, payload.note.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[axum::debug_handler]
pub async fn remove_shortlist_candidate(
    State(state): State<AppState>,
    Path((id, candidate_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    state
        .shortlist_service
        .remove_candidate(id, candidate_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
