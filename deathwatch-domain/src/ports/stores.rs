use async_trait::async_trait;

use crate::entities::DeathEvent;
use crate::value_objects::ScanOffset;

/// Durable checkpoint of how far into the source log scanning has progressed.
#[async_trait]
pub trait OffsetStore: Send + Sync {
    /// Last offset known to be durable.
    async fn current(&self) -> ScanOffset;

    /// Writes `offset` to stable storage. The in-memory value changes only if
    /// the write succeeded.
    async fn persist(&self, offset: ScanOffset) -> anyhow::Result<()>;
}

/// Durable collection of death events kept sorted ascending by timestamp.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Point-in-time copy, safe to hold while writers continue.
    async fn snapshot(&self) -> Vec<DeathEvent>;

    async fn count(&self) -> usize;

    /// Adds `batch`, re-sorts and persists. Returns `(total, added)`. An empty
    /// batch performs no write.
    async fn append(&self, batch: Vec<DeathEvent>) -> anyhow::Result<(usize, usize)>;

    /// Replaces every event with `all`, sorted, and persists. Returns the total.
    async fn replace(&self, all: Vec<DeathEvent>) -> anyhow::Result<usize>;
}
