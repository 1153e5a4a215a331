use std::sync::Arc;

use deathwatch_domain::ports::{EventStore, OffsetStore};
use deathwatch_domain::RuntimeConfig;

use crate::{Metrics, ScanEngine};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub scanner: Arc<ScanEngine>,
    pub event_store: Arc<dyn EventStore>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Wires the scan engine to the same stores the queries read from.
    pub fn new(
        config: RuntimeConfig,
        offset_store: Arc<dyn OffsetStore>,
        event_store: Arc<dyn EventStore>,
    ) -> Self {
        let scanner = Arc::new(ScanEngine::new(
            config.log_file_path.clone(),
            offset_store,
            event_store.clone(),
        ));
        Self {
            config,
            scanner,
            event_store,
            metrics: Arc::new(Metrics::default()),
        }
    }
}
