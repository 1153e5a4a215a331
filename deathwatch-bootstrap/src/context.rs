use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use deathwatch_application::AppState;
use deathwatch_domain::{EventStore, OffsetStore, RuntimeConfig};
use deathwatch_infrastructure::{AppConfig, JsonEventStore, JsonOffsetStore};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        Self::from_runtime_config(config.to_runtime_config()).await
    }

    /// Opens both stores. A present but unreadable state file is fatal;
    /// missing files mean a first run.
    pub async fn from_runtime_config(runtime_config: RuntimeConfig) -> Result<Self> {
        let offsets = JsonOffsetStore::open(&runtime_config.state_path)
            .await
            .context("failed to load scanner state")?;
        let events = JsonEventStore::open(&runtime_config.events_path)
            .await
            .context("failed to load death events")?;
        info!(
            "watching {} ({} known deaths, offset {})",
            runtime_config.log_file_path.display(),
            events.count().await,
            offsets.current().await
        );

        let state = AppState::new(runtime_config, Arc::new(offsets), Arc::new(events));
        Ok(Self { state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn corrupt_state_file_is_fatal() {
        let dir = TempDir::new().expect("temp dir");
        let config = RuntimeConfig::for_paths(dir.path().join("debug.txt"), dir.path().join("data"));
        tokio::fs::create_dir_all(dir.path().join("data"))
            .await
            .expect("data dir");
        tokio::fs::write(&config.state_path, "not json")
            .await
            .expect("seed state");

        assert!(AppContext::from_runtime_config(config).await.is_err());
    }

    #[tokio::test]
    async fn first_run_creates_data_dir() {
        let dir = TempDir::new().expect("temp dir");
        let config = RuntimeConfig::for_paths(dir.path().join("debug.txt"), dir.path().join("data"));

        let context = AppContext::from_runtime_config(config)
            .await
            .expect("first run");
        assert!(dir.path().join("data").is_dir());
        assert_eq!(context.state.event_store.count().await, 0);
    }
}
