use std::io::SeekFrom;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};

use deathwatch_domain::{parse_death_line, DeathEvent, ScanOffset};

use crate::ScanError;

/// Result of reading the source log from some offset to end-of-file.
#[derive(Debug)]
pub struct LogChunk {
    pub events: Vec<DeathEvent>,
    pub end: ScanOffset,
    pub lines: usize,
    pub truncated: bool,
    pub file_size: u64,
}

/// Reads every line after `from`, keeping the ones that parse as deaths.
///
/// The log is opened read-only and never written. When the file is now
/// smaller than `from` it was truncated or rotated, and reading restarts at 0.
/// A final line without a terminator is still parsed. `end` is the file
/// cursor after hitting end-of-file.
pub async fn read_new_deaths(path: &Path, from: ScanOffset) -> Result<LogChunk, ScanError> {
    let mut file = File::open(path).await.map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let file_size = file.metadata().await.map_err(ScanError::Stat)?.len();

    let truncated = from.is_past(file_size);
    let start = if truncated { ScanOffset::START } else { from };
    file.seek(SeekFrom::Start(start.get()))
        .await
        .map_err(ScanError::Seek)?;

    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut events = Vec::new();
    let mut lines = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(ScanError::Read)?;
        if read == 0 {
            break;
        }
        lines += 1;

        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(['\r', '\n']);
        if let Some(event) = parse_death_line(line) {
            events.push(event);
        }
    }

    let mut file = reader.into_inner();
    let end = file
        .seek(SeekFrom::Current(0))
        .await
        .map_err(ScanError::Seek)?;

    Ok(LogChunk {
        events,
        end: ScanOffset(end),
        lines,
        truncated,
        file_size,
    })
}
