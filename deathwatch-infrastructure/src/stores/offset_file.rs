use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use deathwatch_domain::{OffsetStore, ScanOffset, ScannerState};

use crate::stores::StoreError;
use crate::utils::{atomic_write, ensure_parent_dir};

/// Offset checkpoint backed by a small JSON file (`{"offset": n}`).
pub struct JsonOffsetStore {
    path: PathBuf,
    offset: Mutex<ScanOffset>,
}

impl JsonOffsetStore {
    /// Creates the parent directory and loads the persisted offset.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        ensure_parent_dir(&path)
            .await
            .map_err(|err| StoreError::io(&path, err))?;
        let offset = load_offset(&path).await?;
        Ok(Self {
            path,
            offset: Mutex::new(offset),
        })
    }
}

/// Absent file means first run (offset 0). A file that exists but does not
/// decode is reported as corrupt rather than silently reset.
pub async fn load_offset(path: &Path) -> Result<ScanOffset, StoreError> {
    let content = match fs::read(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ScanOffset::START),
        Err(err) => return Err(StoreError::io(path, err)),
    };
    let state: ScannerState =
        serde_json::from_slice(&content).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(ScanOffset::from_signed(state.offset))
}

#[async_trait]
impl OffsetStore for JsonOffsetStore {
    async fn current(&self) -> ScanOffset {
        *self.offset.lock().await
    }

    async fn persist(&self, offset: ScanOffset) -> anyhow::Result<()> {
        let state = ScannerState {
            offset: i64::try_from(offset.get())?,
        };
        let content = serde_json::to_vec_pretty(&state).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        let mut current = self.offset.lock().await;
        atomic_write(&self.path, &content)
            .await
            .map_err(|err| StoreError::io(&self.path, err))?;
        *current = offset;
        Ok(())
    }
}
