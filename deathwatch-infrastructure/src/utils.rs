use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Replaces `path` with `content` through a synced temp file and a rename, so
/// readers see either the previous file or the new one, never a torn write.
pub async fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    ensure_parent_dir(path).await?;
    let temp_path = temp_path_for(path);

    let mut file = fs::File::create(&temp_path).await?;
    file.write_all(content).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(&temp_path, path).await
}

pub async fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn atomic_write_replaces_content_and_leaves_no_temp_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("state.json");

        atomic_write(&path, b"first").await.expect("first write");
        atomic_write(&path, b"second").await.expect("second write");

        let content = fs::read_to_string(&path).await.expect("read back");
        assert_eq!(content, "second");
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[tokio::test]
    async fn atomic_write_creates_parent_dirs() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("data").join("deaths.json");

        atomic_write(&path, b"[]").await.expect("write");

        assert!(path.exists());
    }
}
