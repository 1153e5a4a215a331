use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;

use deathwatch_application::commands::refresh_commands;
use deathwatch_application::queries::death_queries;
use deathwatch_application::AppState;
use deathwatch_domain::{DeathEvent, DeathQuery, RefreshQuery, ScanReport};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn list_deaths(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeathQuery>,
) -> Result<Json<Vec<DeathEvent>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let events = death_queries::list_deaths(&state, query).await?;
    Ok(Json(events))
}

pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<ScanReport>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let mode = refresh_commands::parse_refresh_mode(query.mode.as_deref())?;
    let report = refresh_commands::run_refresh(&state, mode).await?;
    Ok(Json(report))
}
