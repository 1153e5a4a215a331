//! In-memory store doubles shared by the unit tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use deathwatch_domain::{sort_by_timestamp, DeathEvent, EventStore, OffsetStore, ScanOffset};

pub const MORDOR: &str =
    "2025-12-05 14:59:55: ACTION[Server]: Mordor dies at (23,-29035,-22). Bones placed";
pub const ALICE: &str =
    "2025-12-06 10:00:00: ACTION[Server]: Alice dies at (100,20,-5). Bones placed";
pub const BOB: &str = "2025-12-07 10:00:00: ACTION[Server]: Bob dies at (1,2,3). Bones placed";

#[derive(Default)]
pub struct MemoryOffsets {
    pub offset: Mutex<ScanOffset>,
    pub fail: AtomicBool,
}

#[async_trait]
impl OffsetStore for MemoryOffsets {
    async fn current(&self) -> ScanOffset {
        *self.offset.lock().await
    }

    async fn persist(&self, offset: ScanOffset) -> anyhow::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        *self.offset.lock().await = offset;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryEvents {
    pub events: RwLock<Vec<DeathEvent>>,
    pub writes: Mutex<usize>,
}

#[async_trait]
impl EventStore for MemoryEvents {
    async fn snapshot(&self) -> Vec<DeathEvent> {
        self.events.read().await.clone()
    }

    async fn count(&self) -> usize {
        self.events.read().await.len()
    }

    async fn append(&self, batch: Vec<DeathEvent>) -> anyhow::Result<(usize, usize)> {
        if batch.is_empty() {
            return Ok((self.count().await, 0));
        }
        let added = batch.len();
        let mut events = self.events.write().await;
        events.extend(batch);
        sort_by_timestamp(&mut events);
        *self.writes.lock().await += 1;
        Ok((events.len(), added))
    }

    async fn replace(&self, mut all: Vec<DeathEvent>) -> anyhow::Result<usize> {
        sort_by_timestamp(&mut all);
        let mut events = self.events.write().await;
        *events = all;
        *self.writes.lock().await += 1;
        Ok(events.len())
    }
}
