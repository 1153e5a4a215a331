use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use deathwatch_application::commands::refresh_commands::run_incremental_refresh;
use deathwatch_application::AppState;

/// Runs an incremental refresh every `scan_interval_seconds`. Returns at once
/// when the interval is 0. Failures are logged and the loop keeps going.
pub async fn schedule_scans(state: AppState) {
    let seconds = state.config.scan_interval_seconds;
    if seconds == 0 {
        return;
    }
    info!("periodic scan every {}s", seconds);

    let mut ticker = tokio::time::interval(Duration::from_secs(seconds));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the startup scan already covered it.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if let Err(err) = run_incremental_refresh(&state).await {
            error!("periodic scan failed: {}", err);
        }
    }
}

/// One scan before serving, when enabled. A failure is logged, not fatal.
pub async fn startup_scan(state: &AppState) {
    if !state.config.scan_on_startup {
        return;
    }
    if let Err(err) = run_incremental_refresh(state).await {
        error!("startup scan failed: {}", err);
    }
}
