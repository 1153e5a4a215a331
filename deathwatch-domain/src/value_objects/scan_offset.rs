// Scan offset value object

use serde::{Deserialize, Serialize};

/// Bytes of the source log already scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScanOffset(pub u64);

impl ScanOffset {
    pub const START: ScanOffset = ScanOffset(0);

    /// Clamps a signed value read from disk; negative means corrupt state and restarts at 0.
    pub fn from_signed(value: i64) -> Self {
        ScanOffset(u64::try_from(value).unwrap_or(0))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// True when a log of `file_size` bytes can no longer contain this offset.
    pub fn is_past(self, file_size: u64) -> bool {
        file_size < self.0
    }
}

impl std::fmt::Display for ScanOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_offsets_clamp_to_start() {
        assert_eq!(ScanOffset::from_signed(-42), ScanOffset::START);
        assert_eq!(ScanOffset::from_signed(0), ScanOffset::START);
        assert_eq!(ScanOffset::from_signed(1024), ScanOffset(1024));
    }

    #[test]
    fn offset_is_past_only_when_file_shrank() {
        let offset = ScanOffset(100);
        assert!(offset.is_past(99));
        assert!(!offset.is_past(100));
        assert!(!offset.is_past(250));
    }
}
