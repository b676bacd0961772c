use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;

use crate::config::get_config;
use crate::error::Error;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Guards the integration router. Comparison is constant-time so the key
/// cannot be probed byte by byte.
pub async fn require_api_key(req: Request<Body>, next: Next) -> Response {
    let expected = get_config().api_key.as_bytes();
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .as_bytes();

    if provided.is_empty() || provided.ct_eq(expected).unwrap_u8() != 1 {
        return Error::Unauthorized("Missing or invalid API key".to_string()).into_response();
    }
    next.run(req).await
}
