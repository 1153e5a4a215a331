use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("scan failed: {0}")]
    Scan(#[from] ScanError),
}

/// Why a single refresh failed. Durable state is left as of the last
/// successful scan for every variant except `PersistEvents`, where the offset
/// has already advanced.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot open log file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot stat log file: {0}")]
    Stat(#[source] std::io::Error),
    #[error("seek failed: {0}")]
    Seek(#[source] std::io::Error),
    #[error("read log failed: {0}")]
    Read(#[source] std::io::Error),
    #[error("persist state failed: {0}")]
    PersistOffset(#[source] anyhow::Error),
    #[error("persist events failed: {0}")]
    PersistEvents(#[source] anyhow::Error),
}
