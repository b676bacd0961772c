use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{error::Result, services::export_service::ExportService, AppState};

/// All candidates with their latest score for one job.
pub async fn export_job_candidates(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get_by_id(job_id).await?;
    let candidates = state.candidate_service.list_all().await?;
    let scores = state.fit_score_service.latest_scores_for_job(job_id).await?;

    let title = format!("Candidates for {} at {}", job.title, job.company);
    let buffer = ExportService::generate_candidates_xlsx(&title, &candidates, &scores)?;

    let filename = format!(
        "candidates_{}_{}.xlsx",
        job.title.replace(' ', "_"),
        chrono::Utc::now().format("%Y%m%d")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}

/// The whole candidate pool, without job scores.
pub async fn export_candidates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let candidates = state.candidate_service.list_all().await?;

    let buffer =
        ExportService::generate_candidates_xlsx("Candidate pool", &candidates, &HashMap::new())?;

    let filename = format!(
        "candidates_export_{}.xlsx",
        chrono::Utc::now().format("%Y%m%d_%H%M")
    );
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet".to_string(),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
