use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::{Mutex, RwLock};

use deathwatch_domain::{sort_by_timestamp, DeathEvent, EventStore};

use crate::stores::StoreError;
use crate::utils::{atomic_write, ensure_parent_dir};

/// Death events held in memory and mirrored to a pretty-printed JSON array.
///
/// Readers take the `RwLock` only long enough to clone. Writers serialize on
/// `persist_lock`, mutate under the write guard, release it, then write the
/// copied payload, so a slow disk never blocks snapshot reads.
pub struct JsonEventStore {
    path: PathBuf,
    events: RwLock<Vec<DeathEvent>>,
    persist_lock: Mutex<()>,
}

impl JsonEventStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        ensure_parent_dir(&path)
            .await
            .map_err(|err| StoreError::io(&path, err))?;
        let events = load_events(&path).await?;
        Ok(Self {
            path,
            events: RwLock::new(events),
            persist_lock: Mutex::new(()),
        })
    }

    async fn write_payload(&self, events: &[DeathEvent]) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(events).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;
        atomic_write(&self.path, &content)
            .await
            .map_err(|err| StoreError::io(&self.path, err))
    }
}

/// Absent or blank file yields no events; anything else must decode.
pub async fn load_events(path: &Path) -> Result<Vec<DeathEvent>, StoreError> {
    let content = match fs::read(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(StoreError::io(path, err)),
    };
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let mut events: Vec<DeathEvent> =
        serde_json::from_slice(&content).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
    sort_by_timestamp(&mut events);
    Ok(events)
}

#[async_trait]
impl EventStore for JsonEventStore {
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

        let _persist = self.persist_lock.lock().await;
        let added = batch.len();
        let payload = {
            let mut events = self.events.write().await;
            events.extend(batch);
            sort_by_timestamp(&mut events);
            events.clone()
        };

        self.write_payload(&payload).await?;
        Ok((payload.len(), added))
    }

    async fn replace(&self, mut all: Vec<DeathEvent>) -> anyhow::Result<usize> {
        let _persist = self.persist_lock.lock().await;
        sort_by_timestamp(&mut all);
        let payload = {
            let mut events = self.events.write().await;
            *events = all;
            events.clone()
        };

        self.write_payload(&payload).await?;
        Ok(payload.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deathwatch_domain::parse_death_line;
    use tempfile::TempDir;

    fn death(date: &str, player: &str) -> DeathEvent {
        let line = format!("{date}: ACTION[Server]: {player} dies at (1,2,3). Bones placed");
        parse_death_line(&line).expect("valid death line")
    }

    fn players(events: &[DeathEvent]) -> Vec<&str> {
        events.iter().map(|event| event.player.as_str()).collect()
    }

    #[tokio::test]
    async fn missing_and_blank_files_load_empty() {
        let dir = TempDir::new().expect("temp dir");
        let missing = JsonEventStore::open(dir.path().join("deaths.json"))
            .await
            .expect("open missing");
        assert_eq!(missing.count().await, 0);

        let blank_path = dir.path().join("blank.json");
        fs::write(&blank_path, "  \n\t ").await.expect("seed blank");
        let blank = JsonEventStore::open(&blank_path).await.expect("open blank");
        assert_eq!(blank.count().await, 0);
    }

    #[tokio::test]
    async fn corrupt_file_is_rejected() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("deaths.json");
        fs::write(&path, "[{\"player\": ").await.expect("seed");

        let err = JsonEventStore::open(&path).await.err().expect("corrupt rejected");
        assert!(err.is_corrupt());
    }

    #[tokio::test]
    async fn non_utf8_file_is_corrupt_not_io() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("deaths.json");
        fs::write(&path, [0xff, 0xfe, b'[', b']']).await.expect("seed");

        let err = load_events(&path).await.expect_err("invalid utf-8 rejected");
        assert!(err.is_corrupt(), "expected corrupt, got {err}");
    }

    #[tokio::test]
    async fn append_sorts_and_persists() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("deaths.json");
        let store = JsonEventStore::open(&path).await.expect("open");

        let (total, added) = store
            .append(vec![death("2025-12-07 00:00:00", "Bob")])
            .await
            .expect("append bob");
        assert_eq!((total, added), (1, 1));

        let (total, added) = store
            .append(vec![
                death("2025-12-06 00:00:00", "Alice"),
                death("2025-12-05 14:59:55", "Mordor"),
            ])
            .await
            .expect("append rest");
        assert_eq!((total, added), (3, 2));
        assert_eq!(players(&store.snapshot().await), ["Mordor", "Alice", "Bob"]);

        let reloaded = load_events(&path).await.expect("reload");
        assert_eq!(players(&reloaded), ["Mordor", "Alice", "Bob"]);
    }

    #[tokio::test]
    async fn empty_append_does_not_write() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("deaths.json");
        let store = JsonEventStore::open(&path).await.expect("open");

        let (total, added) = store.append(Vec::new()).await.expect("empty append");
        assert_eq!((total, added), (0, 0));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn replace_discards_previous_events() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonEventStore::open(dir.path().join("deaths.json"))
            .await
            .expect("open");
        store
            .append(vec![death("2025-01-01 00:00:00", "Ghost")])
            .await
            .expect("append");

        let total = store
            .replace(vec![
                death("2025-12-06 00:00:00", "Alice"),
                death("2025-12-05 00:00:00", "Mordor"),
            ])
            .await
            .expect("replace");
        assert_eq!(total, 2);
        assert_eq!(players(&store.snapshot().await), ["Mordor", "Alice"]);
    }

    #[tokio::test]
    async fn snapshot_is_isolated_from_later_writes() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonEventStore::open(dir.path().join("deaths.json"))
            .await
            .expect("open");
        store
            .append(vec![death("2025-12-05 00:00:00", "Mordor")])
            .await
            .expect("append");

        let snapshot = store.snapshot().await;
        store
            .append(vec![death("2025-12-06 00:00:00", "Alice")])
            .await
            .expect("append");

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn failed_persist_surfaces_error_but_keeps_memory() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("deaths.json");
        let store = JsonEventStore::open(&path).await.expect("open");
        fs::create_dir(dir.path().join("deaths.json.tmp"))
            .await
            .expect("block temp file");

        let result = store
            .append(vec![death("2025-12-05 00:00:00", "Mordor")])
            .await;
        assert!(result.is_err());
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn on_disk_format_uses_documented_field_names() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("deaths.json");
        let store = JsonEventStore::open(&path).await.expect("open");
        store
            .append(vec![death("2025-12-05 14:59:55", "Mordor")])
            .await
            .expect("append");

        let raw = fs::read_to_string(&path).await.expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        let entry = &value[0];
        for field in ["timestamp", "player", "x", "y", "z", "raw_line", "discovered_at"] {
            assert!(entry.get(field).is_some(), "missing field {field}");
        }
        assert!(raw.contains("\n  "), "expected indented output");
    }
}
