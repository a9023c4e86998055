//! Reading and writing the queue file.
use crate::error::{persistence_error, Result};
use crate::queue::{Entry, Queue};
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Load the queue. A missing file or a `null` document is an empty queue.
pub async fn load(path: &Path) -> Result<Queue> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Queue file {} doesn't exist, starting empty", path.display());

            return Ok(Queue::new());
        }
        Err(e) => return persistence_error(&format!("Cannot read {}: {}", path.display(), e)),
    };

    match serde_json::from_str::<Option<Vec<Entry>>>(&content) {
        Ok(entries) => Ok(Queue::from(entries.unwrap_or_default())),
        Err(e) => persistence_error(&format!("Cannot parse {}: {}", path.display(), e)),
    }
}

/// Write the queue into a temporary file next to `path` and rename it over the old one.
pub async fn save(path: &Path, q: &Queue) -> Result<()> {
    let json = serde_json::to_string_pretty(q)?;
    let tmp = tmp_path(path);

    if let Err(e) = tokio::fs::write(&tmp, json).await {
        return persistence_error(&format!("Cannot write {}: {}", tmp.display(), e));
    }

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        return persistence_error(&format!("Cannot rename {} to {}: {}", tmp.display(), path.display(), e));
    }

    debug!("Saved {} entries to {}", q.len(), path.display());

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");

    PathBuf::from(tmp)
}
