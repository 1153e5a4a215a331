// Scan bookkeeping entities

use serde::{Deserialize, Serialize};

use crate::value_objects::ScanMode;

/// On-disk form of the offset file: `{"offset": n}`.
///
/// Kept signed so a negative value written by another tool still parses and
/// can be clamped instead of failing startup.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScannerState {
    pub offset: i64,
}

/// Outcome of one refresh, returned to whoever triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub mode: ScanMode,
    pub added: usize,
    pub total: usize,
    pub offset: u64,
    pub truncated: bool,
}
