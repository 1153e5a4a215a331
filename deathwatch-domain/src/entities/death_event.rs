// Death event entity
// One player death parsed from the server action log

use std::cmp::Ordering;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathEvent {
    pub timestamp: DateTime<Local>,
    pub player: String,
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub raw_line: String,
    pub discovered_at: DateTime<Local>,
}

impl DeathEvent {
    pub fn cmp_by_timestamp(&self, other: &Self) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

/// Sorts ascending by event timestamp. Order among equal timestamps is unspecified.
pub fn sort_by_timestamp(events: &mut [DeathEvent]) {
    events.sort_unstable_by(DeathEvent::cmp_by_timestamp);
}

/// Sorts newest first, the order the query surface hands out.
pub fn sort_by_timestamp_desc(events: &mut [DeathEvent]) {
    events.sort_unstable_by(|a, b| b.cmp_by_timestamp(a));
}
