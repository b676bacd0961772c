use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use crate::{dto::candidate_dto::DashboardStatsResponse, error::Result, AppState};

#[axum::debug_handler]
pub async fn get_dashboard_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let status_counts = state.candidate_service.status_counts().await?;
    let intake_history = state.candidate_service.intake_history().await?;
    let open_jobs = state.job_service.count_open().await?;
    let total_candidates = status_counts.values().sum();

    Ok(Json(DashboardStatsResponse {
        total_candidates,
        status_counts,
        intake_history,
        open_jobs,
    }))
}
