use axum::Router;

use deathwatch_application::AppState;

use crate::handlers::{death_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", axum::routing::get(ops_handlers::health_live))
        .route("/api/deaths", axum::routing::get(death_handlers::list_deaths))
        .route("/api/refresh", axum::routing::post(death_handlers::refresh))
        .route(
            "/api/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/api/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
