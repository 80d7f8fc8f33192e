use std::sync::Arc;

use domain::DomainError;
use domain::connectivity::ConnectivityProbe;
use domain::session::{OfflineQueue, SessionId, SessionStore};
use tracing::{info, warn};

/// Aggregate result of one reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    pub synced: usize,
    pub failed: usize,
}

/// Terminal state of a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Precondition failed: no connectivity. Queue untouched.
    NoConnection,
    /// Precondition: the queue was already empty.
    NothingToSync,
    /// The batch ran to the end. Partial success is a valid terminal state,
    /// not an error.
    Completed(SyncReport),
}

/// Drains the offline queue into the remote store.
///
/// Records are processed strictly one at a time. Each record is removed from
/// the queue the moment its remote write is confirmed, so a crash mid-batch
/// leaves only the unsynced tail queued and a re-run never duplicates an
/// already-synced record.
pub struct Reconciler {
    queue: Arc<dyn OfflineQueue>,
    remote: Arc<dyn SessionStore>,
    connectivity: Arc<dyn ConnectivityProbe>,
}

impl Reconciler {
    pub fn new(
        queue: Arc<dyn OfflineQueue>,
        remote: Arc<dyn SessionStore>,
        connectivity: Arc<dyn ConnectivityProbe>,
    ) -> Self {
        Self {
            queue,
            remote,
            connectivity,
        }
    }

    pub async fn run(&self) -> Result<SyncOutcome, DomainError> {
        // Point-in-time decision; we never wait for connectivity to change.
        if !self.connectivity.is_connected() {
            warn!("Sync requested without connectivity. Queue untouched.");
            return Ok(SyncOutcome::NoConnection);
        }

        let pending = self.queue.list().await?;
        if pending.is_empty() {
            info!("Nothing to sync.");
            return Ok(SyncOutcome::NothingToSync);
        }

        info!("📤 Syncing {} queued session(s)...", pending.len());
        let mut report = SyncReport::default();

        for session in &pending {
            // Pending ids were minted on-device: the remote store assigns the
            // real identity. A non-pending id in the queue means an existing
            // remote record was edited offline; write it back under its key.
            let write = match &session.id {
                SessionId::Pending(_) => self.remote.create(&session.data).await.map(|_| ()),
                SessionId::Synced(id) => self.remote.update(id, &session.data).await,
            };

            match write {
                Ok(()) => match self.queue.remove(&session.id).await {
                    Ok(()) => report.synced += 1,
                    Err(e) => {
                        // The remote write landed but the local removal did
                        // not; count it failed and leave it for the operator
                        // to retry rather than abort the tail.
                        warn!("Synced {} but failed to dequeue: {}", session.id, e);
                        report.failed += 1;
                    }
                },
                Err(e) => {
                    warn!("Failed to sync session {}: {}. Continuing.", session.id, e);
                    report.failed += 1;
                }
            }
        }

        info!(
            "✅ Sync finished: {} succeeded, {} failed",
            report.synced, report.failed
        );
        Ok(SyncOutcome::Completed(report))
    }
}
