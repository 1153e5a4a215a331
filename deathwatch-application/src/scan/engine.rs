use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use deathwatch_domain::{EventStore, OffsetStore, ScanMode, ScanOffset, ScanReport};

use crate::scan::read_new_deaths;
use crate::ScanError;

/// Drives incremental and full scans of the source log.
///
/// Both kinds share `scan_lock`, so at most one scan reads the log at a time
/// and concurrent callers wait their turn. The offset is persisted before the
/// events: a crash between the two writes loses that batch rather than
/// re-announcing it on the next run.
pub struct ScanEngine {
    log_path: PathBuf,
    offsets: Arc<dyn OffsetStore>,
    events: Arc<dyn EventStore>,
    scan_lock: Mutex<()>,
}

impl ScanEngine {
    pub fn new(
        log_path: impl Into<PathBuf>,
        offsets: Arc<dyn OffsetStore>,
        events: Arc<dyn EventStore>,
    ) -> Self {
        Self {
            log_path: log_path.into(),
            offsets,
            events,
            scan_lock: Mutex::new(()),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub async fn run_incremental(&self) -> Result<ScanReport, ScanError> {
        self.run(ScanMode::Incremental).await
    }

    pub async fn run_full(&self) -> Result<ScanReport, ScanError> {
        self.run(ScanMode::Full).await
    }

    pub async fn run(&self, mode: ScanMode) -> Result<ScanReport, ScanError> {
        let _scan = self.scan_lock.lock().await;

        let stored = self.offsets.current().await;
        let from = match mode {
            ScanMode::Incremental => stored,
            ScanMode::Full => ScanOffset::START,
        };

        let chunk = read_new_deaths(&self.log_path, from).await?;
        if chunk.truncated {
            warn!(
                "log truncation detected (size={} < offset={}), resetting offset to 0",
                chunk.file_size, stored
            );
        }

        self.offsets
            .persist(chunk.end)
            .await
            .map_err(ScanError::PersistOffset)?;

        let found = chunk.events.len();
        let (added, total) = match mode {
            ScanMode::Incremental => {
                let (total, added) = self
                    .events
                    .append(chunk.events)
                    .await
                    .map_err(ScanError::PersistEvents)?;
                (added, total)
            }
            ScanMode::Full => {
                let total = self
                    .events
                    .replace(chunk.events)
                    .await
                    .map_err(ScanError::PersistEvents)?;
                (total, total)
            }
        };

        info!(
            mode = %mode,
            lines = chunk.lines,
            found,
            total,
            offset = chunk.end.get(),
            "scan finished: found {} new deaths",
            added
        );

        Ok(ScanReport {
            mode,
            added,
            total,
            offset: chunk.end.get(),
            truncated: chunk.truncated,
        })
    }
}
