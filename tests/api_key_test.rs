use std::env;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

fn guarded_router() -> Router {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://localhost/talentfit_test");
    env::set_var("API_KEY", "test_api_key");
    env::set_var("WEBHOOK_SECRET", "whsec_test");
    env::set_var("INTEGRATION_RPS", "100");
    env::set_var("PUBLIC_RPS", "100");
    let _ = talentfit_backend::config::init_config();

    let pool = PgPoolOptions::new()
        .connect_lazy(&talentfit_backend::config::get_config().database_url)
        .expect("lazy pool");
    let state = talentfit_backend::AppState::new(pool);

    Router::new()
        .route(
            "/api/integration/dictionaries/candidate-statuses",
            get(talentfit_backend::routes::candidate_routes::list_candidate_statuses),
        )
        .layer(axum::middleware::from_fn(
            talentfit_backend::middleware::api_key::require_api_key,
        ))
        .with_state(state)
}

#[tokio::test]
async fn missing_api_key_is_rejected() {
    let app = guarded_router();
    let req = Request::builder()
        .method("GET")
        .uri("/api/integration/dictionaries/candidate-statuses")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_api_key_is_rejected() {
    let app = guarded_router();
    let req = Request::builder()
        .method("GET")
        .uri("/api/integration/dictionaries/candidate-statuses")
        .header("x-api-key", "not_the_key")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_api_key_is_accepted() {
    let app = guarded_router();
    let req = Request::builder()
        .method("GET")
        .uri("/api/integration/dictionaries/candidate-statuses")
        .header("x-api-key", "test_api_key")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
