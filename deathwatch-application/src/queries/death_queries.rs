use deathwatch_domain::{sort_by_timestamp_desc, DeathEvent, DeathQuery};

use crate::{AppError, AppState};

pub const MAX_LIST_LIMIT: usize = 5000;

/// Point-in-time copy of every known death, oldest first.
pub async fn get_events(state: &AppState) -> Vec<DeathEvent> {
    state.event_store.snapshot().await
}

/// Newest first, optionally narrowed to one player (case-insensitive exact
/// match) and capped at `limit`, which is clamped to `1..=MAX_LIST_LIMIT`.
pub async fn list_deaths(state: &AppState, query: DeathQuery) -> Result<Vec<DeathEvent>, AppError> {
    let player = query
        .player
        .as_deref()
        .map(str::trim)
        .filter(|player| !player.is_empty());

    let mut events = get_events(state).await;
    if let Some(player) = player {
        events.retain(|event| event.player.eq_ignore_ascii_case(player));
    }
    sort_by_timestamp_desc(&mut events);

    if let Some(limit) = query.limit {
        events.truncate(limit.clamp(1, MAX_LIST_LIMIT));
    }
    Ok(events)
}
