use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{
        CreateJobPayload, JobListQuery, JobListResponse, JobPublicListResponse, JobPublicQuery,
        JobPublicSummary, JobResponse, UpdateJobPayload,
    },
    error::Result,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/integration/jobs",
    request_body = CreateJobPayload,
    responses(
        (status = 201, description = "Job created successfully"),
        (status = 400, description = "Invalid payload or weights")
    )
)]
#[axum::debug_handler]
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(JobResponse::from(job))))
}

#[utoipa::path(
    patch,
    path = "/api/integration/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    request_body = UpdateJobPayload,
    responses(
        (status = 200, description = "Job updated successfully"),
        (status = 400, description = "Invalid payload or weights"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let job = state.job_service.update(id, payload).await?;
    Ok(Json(JobResponse::from(job)))
}

#[utoipa::path(
    delete,
    path = "/api/integration/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 204, description = "Job deleted successfully"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.job_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/integration/jobs",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("company" = Option<String>, Query, description = "Filter by company"),
        ("search" = Option<String>, Query, description = "Search query")
    ),
    responses(
        (status = 200, description = "List of jobs")
    )
)]
#[axum::debug_handler]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.job_service.list(query).await?;
    Ok(Json(JobListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/integration/jobs/{id}",
    params(
        ("id" = Uuid, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "Job found"),
        (status = 404, description = "Job not found")
    )
)]
#[axum::debug_handler]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    Ok(Json(JobResponse::from(job)))
}

#[axum::debug_handler]
pub async fn list_open_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobPublicQuery>,
) -> Result<impl IntoResponse> {
    let limit = query.limit.unwrap_or(20).min(100);
    let items = state.job_service.list_open(limit).await?;
    let summaries: Vec<JobPublicSummary> = items.into_iter().map(Into::into).collect();
    Ok(Json(JobPublicListResponse { items: summaries }))
}

#[axum::debug_handler]
pub async fn get_open_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(id).await?;
    if job.status != "open" {
        return Err(crate::error::Error::NotFound("Job not found".into()));
    }
    Ok(Json(JobResponse::from(job)))
}
