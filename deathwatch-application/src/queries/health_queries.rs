use tracing::warn;

use crate::AppState;

/// True when the source log can currently be opened for reading.
pub async fn source_log_ready(state: &AppState) -> bool {
    match tokio::fs::File::open(state.scanner.log_path()).await {
        Ok(_) => true,
        Err(err) => {
            warn!(
                "source log {} not readable: {}",
                state.scanner.log_path().display(),
                err
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryEvents, MemoryOffsets};
    use deathwatch_domain::RuntimeConfig;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn ready_tracks_log_presence() {
        let dir = TempDir::new().expect("temp dir");
        let log = dir.path().join("debug.txt");
        let state = AppState::new(
            RuntimeConfig::for_paths(&log, dir.path().join("data")),
            Arc::new(MemoryOffsets::default()),
            Arc::new(MemoryEvents::default()),
        );

        assert!(!source_log_ready(&state).await);
        tokio::fs::write(&log, "").await.expect("create log");
        assert!(source_log_ready(&state).await);
    }
}
