use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use tokio::time::{timeout, Duration};
use tracing::error;

use deathwatch_application::queries::health_queries;
use deathwatch_application::AppState;

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn health_live() -> &'static str {
    "ok"
}

pub async fn health_ready(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let timeout_secs = state.config.request_timeout_seconds.max(1);
    let timeout_duration = Duration::from_secs(timeout_secs);
    match timeout(timeout_duration, health_queries::source_log_ready(&state)).await {
        Ok(true) => Ok(StatusCode::OK),
        Ok(false) => Ok(StatusCode::SERVICE_UNAVAILABLE),
        Err(_) => {
            error!("ready check timeout after {}s", timeout_secs);
            Ok(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

pub async fn metrics_prometheus(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.config, &headers) {
        return HttpError::Unauthorized.into_response();
    }
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload).into_response()
}
