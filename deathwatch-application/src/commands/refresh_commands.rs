use tracing::error;

use crate::{AppError, AppState};
use deathwatch_domain::{ScanMode, ScanReport};

/// Runs one scan through the shared engine and records its outcome.
pub async fn run_refresh(state: &AppState, mode: ScanMode) -> Result<ScanReport, AppError> {
    match state.scanner.run(mode).await {
        Ok(report) => {
            state.metrics.record_scan(&report);
            Ok(report)
        }
        Err(err) => {
            state.metrics.record_scan_error();
            error!("{} scan failed: {}", mode, err);
            Err(AppError::Scan(err))
        }
    }
}

pub async fn run_incremental_refresh(state: &AppState) -> Result<ScanReport, AppError> {
    run_refresh(state, ScanMode::Incremental).await
}

pub async fn run_full_refresh(state: &AppState) -> Result<ScanReport, AppError> {
    run_refresh(state, ScanMode::Full).await
}

/// Accepts the raw `mode` query value; absent means incremental.
pub fn parse_refresh_mode(raw: Option<&str>) -> Result<ScanMode, AppError> {
    raw.unwrap_or_default()
        .parse::<ScanMode>()
        .map_err(AppError::BadRequest)
}
