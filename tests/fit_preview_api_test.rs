use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

fn test_state() -> talentfit_backend::AppState {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("DATABASE_URL", "postgres://localhost/talentfit_test");
    env::set_var("API_KEY", "test_api_key");
    env::set_var("WEBHOOK_SECRET", "whsec_test");
    env::set_var("INTEGRATION_RPS", "100");
    env::set_var("PUBLIC_RPS", "100");
    let _ = talentfit_backend::config::init_config();

    // None of the routes under test touch the database, so a lazy pool
    // that never connects is enough.
    let pool = PgPoolOptions::new()
        .connect_lazy(&talentfit_backend::config::get_config().database_url)
        .expect("lazy pool");
    talentfit_backend::AppState::new(pool)
}

fn preview_router(state: talentfit_backend::AppState) -> Router {
    Router::new()
        .route("/health", get(talentfit_backend::routes::health::health))
        .route(
            "/api/integration/fit-scores/preview",
            post(talentfit_backend::routes::fit_score_routes::preview_fit_score),
        )
        .route(
            "/api/integration/dictionaries/candidate-statuses",
            get(talentfit_backend::routes::candidate_routes::list_candidate_statuses),
        )
        .with_state(state)
}

async fn body_json(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn preview_flow_end_to_end() {
    let app = preview_router(test_state());

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");

    // documented reference case: 90/80/70 with 0.5/0.3/0.2 -> 83
    let payload = json!({ "tms": 90, "srs": 80, "rns": 70 });
    let req = Request::builder()
        .method("POST")
        .uri("/api/integration/fit-scores/preview")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["overall"], 83);
    assert_eq!(body["confidence"], "high");
    assert_eq!(body["tms"]["known"], true);

    let req = Request::builder()
        .method("GET")
        .uri("/api/integration/dictionaries/candidate-statuses")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let statuses = body["statuses"].as_array().unwrap();
    assert_eq!(statuses.len(), 5);
    assert!(statuses.contains(&json!("interviewing")));
}

#[tokio::test]
async fn preview_substitutes_neutral_for_missing_inputs() {
    let app = preview_router(test_state());

    let payload = json!({ "tms": 90, "srs": 80 });
    let req = Request::builder()
        .method("POST")
        .uri("/api/integration/fit-scores/preview")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["rns"]["value"], 50);
    assert_eq!(body["rns"]["known"], false);
    assert_eq!(body["confidence"], "low");
}

#[tokio::test]
async fn preview_rejects_invalid_weights() {
    let app = preview_router(test_state());

    let payload = json!({
        "tms": 90, "srs": 80, "rns": 70,
        "weights": { "tms": 0.9, "srs": 0.3, "rns": 0.2 }
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/integration/fit-scores/preview")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("sum to 1"));
}

#[tokio::test]
async fn custom_weights_shift_the_blend() {
    let app = preview_router(test_state());

    let payload = json!({
        "tms": 100, "srs": 0, "rns": 0,
        "weights": { "tms": 1.0, "srs": 0.0, "rns": 0.0 }
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/integration/fit-scores/preview")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["overall"], 100);
}
