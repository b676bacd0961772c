use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use talentfit_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    {
        let state = app_state.clone();
        tokio::spawn(async move {
            let queue = state.score_queue_service.clone();
            loop {
                match queue.run_once(&state).await {
                    Ok(true) => {}
                    Ok(false) => {
                        tokio::time::sleep(Duration::from_millis(750)).await;
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "Score queue worker error");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });
    }

    {
        let state = app_state.clone();
        tokio::spawn(async move {
            let notif = state.notification_service.clone();
            loop {
                match notif.run_once().await {
                    Ok(true) => {}
                    Ok(false) => {
                        tokio::time::sleep(Duration::from_millis(1000)).await;
                    }
                    Err(e) => {
                        tracing::error!(error = ?e, "Webhook worker error");
                        tokio::time::sleep(Duration::from_secs(2)).await;
                    }
                }
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let integration_api = Router::new()
        .route(
            "/api/integration/candidates",
            get(routes::candidate_routes::list_candidates),
        )
        .route(
            "/api/integration/candidates/export",
            get(routes::export::export_candidates),
        )
        .route(
            "/api/integration/candidates/:id",
            get(routes::candidate_routes::get_candidate)
                .delete(routes::candidate_routes::delete_candidate),
        )
        .route(
            "/api/integration/candidates/:id/status",
            post(routes::candidate_routes::update_candidate_status),
        )
        .route(
            "/api/integration/candidates/:id/soft-skills",
            post(routes::candidate_routes::set_soft_skills_rating),
        )
        .route(
            "/api/integration/candidates/:id/referrals",
            get(routes::referral_routes::list_candidate_referrals),
        )
        .route(
            "/api/integration/referrals",
            post(routes::referral_routes::create_referral_invite),
        )
        .route(
            "/api/integration/jobs",
            get(routes::job_routes::list_jobs).post(routes::job_routes::create_job),
        )
        .route(
            "/api/integration/jobs/:id",
            get(routes::job_routes::get_job)
                .patch(routes::job_routes::update_job)
                .delete(routes::job_routes::delete_job),
        )
        .route(
            "/api/integration/jobs/:id/ranked",
            get(routes::fit_score_routes::rank_candidates_for_job),
        )
        .route(
            "/api/integration/jobs/:id/export",
            get(routes::export::export_job_candidates),
        )
        .route(
            "/api/integration/fit-scores/preview",
            post(routes::fit_score_routes::preview_fit_score),
        )
        .route(
            "/api/integration/fit-scores/recompute",
            post(routes::fit_score_routes::recompute_fit_score),
        )
        .route(
            "/api/integration/fit-scores/:candidate_id/:job_id",
            get(routes::fit_score_routes::get_latest_fit_score),
        )
        .route(
            "/api/integration/fit-scores/:candidate_id/:job_id/history",
            get(routes::fit_score_routes::get_fit_score_history),
        )
        .route(
            "/api/integration/score-events",
            post(routes::fit_score_routes::enqueue_score_event),
        )
        .route(
            "/api/integration/score-events/:id",
            get(routes::fit_score_routes::get_score_event),
        )
        .route(
            "/api/integration/shortlists",
            get(routes::shortlist_routes::list_shortlists)
                .post(routes::shortlist_routes::create_shortlist),
        )
        .route(
            "/api/integration/shortlists/:id",
            get(routes::shortlist_routes::get_shortlist)
                .delete(routes::shortlist_routes::delete_shortlist),
        )
        .route(
            "/api/integration/shortlists/:id/candidates",
            post(routes::shortlist_routes::add_shortlist_candidate),
        )
        .route(
            "/api/integration/shortlists/:id/candidates/:candidate_id",
            axum::routing::delete(routes::shortlist_routes::remove_shortlist_candidate),
        )
        .route(
            "/api/integration/dashboard/stats",
            get(routes::dashboard::get_dashboard_stats),
        )
        .route(
            "/api/integration/dictionaries/candidate-statuses",
            get(routes::candidate_routes::list_candidate_statuses),
        )
        .layer(axum::middleware::from_fn(
            talentfit_backend::middleware::api_key::require_api_key,
        ))
        .layer(axum::middleware::from_fn_with_state(
            talentfit_backend::middleware::rate_limit::new_rps_state(config.integration_rps),
            talentfit_backend::middleware::rate_limit::rps_middleware,
        ));

    let public_api = Router::new()
        .route(
            "/api/public/candidates",
            post(routes::candidate_routes::register_candidate),
        )
        .route(
            "/api/public/candidates/:id",
            get(routes::candidate_routes::get_candidate),
        )
        .route("/api/public/jobs", get(routes::job_routes::list_open_jobs))
        .route(
            "/api/public/jobs/:id",
            get(routes::job_routes::get_open_job),
        )
        .route(
            "/api/public/referrals/:token",
            get(routes::referral_routes::get_referral_by_token),
        )
        .route(
            "/api/public/referrals/:token/submit",
            post(routes::referral_routes::submit_referral),
        )
        .layer(axum::middleware::from_fn_with_state(
            talentfit_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            talentfit_backend::middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(integration_api)
        .merge(public_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
