use crate::persist;
use crate::queue::Queue;
use crate::error::Result;
use log::{error, trace};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Write every snapshot which differs from the last one written successfully. A failed write is
/// retried with the next snapshot.
pub(crate) async fn persist_loop(
    path: PathBuf,
    mut saved: Queue,
    mut snapshots: mpsc::Receiver<Queue>,
    shutdown: CancellationToken,
) -> Result<()> {
    loop {
        tokio::select! {
            snapshot = snapshots.recv() => {
                match snapshot {
                    Some(q) => save_if_changed(&path, &mut saved, q).await,
                    None => return Ok(()),
                }
            }
            _ = shutdown.cancelled() => {
                // only the latest of the pending snapshots matters
                let mut latest = None;

                while let Ok(q) = snapshots.try_recv() {
                    latest = Some(q);
                }

                if let Some(q) = latest {
                    save_if_changed(&path, &mut saved, q).await;
                }

                return Ok(());
            }
        }
    }
}

async fn save_if_changed(path: &Path, saved: &mut Queue, q: Queue) {
    if *saved == q {
        trace!("Queue is unchanged since last save");

        return;
    }

    match persist::save(path, &q).await {
        Ok(()) => *saved = q,
        Err(e) => error!("Cannot save queue, retrying on next change {:?}", e),
    }
}
