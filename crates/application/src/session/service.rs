use std::sync::Arc;

use chrono::Utc;
use domain::DomainError;
use domain::connectivity::ConnectivityProbe;
use domain::session::{
    OfflineQueue, SessionDraft, SessionId, SessionStore, WeighingSession,
};
use rand::Rng;
use tracing::{info, warn};

/// Where a save landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDestination {
    /// Written straight to the remote store
    Remote,
    /// Queued on-device, awaiting reconciliation
    OfflineQueue,
}

#[derive(Debug, Clone)]
pub struct SavedSession {
    pub session: WeighingSession,
    pub destination: SaveDestination,
}

/// Write path for the session form: builds the record, then routes it by a
/// point-in-time connectivity check. Printing works offline, so the caller
/// gets the saved session back either way.
pub struct SessionService {
    remote: Arc<dyn SessionStore>,
    queue: Arc<dyn OfflineQueue>,
    connectivity: Arc<dyn ConnectivityProbe>,
    operator: String,
}

impl SessionService {
    pub fn new(
        remote: Arc<dyn SessionStore>,
        queue: Arc<dyn OfflineQueue>,
        connectivity: Arc<dyn ConnectivityProbe>,
        operator: impl Into<String>,
    ) -> Self {
        Self {
            remote,
            queue,
            connectivity,
            operator: operator.into(),
        }
    }

    pub async fn save(&self, draft: &SessionDraft) -> Result<SavedSession, DomainError> {
        let now = Utc::now().timestamp_millis();
        let data = draft.build(&self.operator, now)?;
        let editing = draft.editing.as_ref().map(|ctx| ctx.id.clone());

        if !self.connectivity.is_connected() {
            let id = match editing {
                // Re-editing offline keeps the id, pending or synced; a
                // synced id in the queue routes the eventual sync to update.
                Some(id) => id,
                None => SessionId::pending(now, rand::thread_rng().gen_range(0..1000)),
            };
            let session = WeighingSession::new(id, data);
            self.queue.save(&session).await?;
            info!("💾 Session {} stored offline, pending sync", session.id);
            return Ok(SavedSession {
                session,
                destination: SaveDestination::OfflineQueue,
            });
        }

        let session = match editing {
            Some(SessionId::Synced(id)) => {
                self.remote.update(&id, &data).await?;
                WeighingSession::new(SessionId::Synced(id), data)
            }
            Some(pending_id @ SessionId::Pending(_)) => {
                // A queued record edited while online: create it remotely and
                // hand ownership over by dropping the queue entry.
                let remote_id = self.remote.create(&data).await?;
                if let Err(e) = self.queue.remove(&pending_id).await {
                    warn!("Synced {} but failed to dequeue: {}", pending_id, e);
                }
                WeighingSession::new(SessionId::synced(remote_id)?, data)
            }
            None => {
                let remote_id = self.remote.create(&data).await?;
                WeighingSession::new(SessionId::synced(remote_id)?, data)
            }
        };

        info!("✅ Session {} saved to remote store", session.id);
        Ok(SavedSession {
            session,
            destination: SaveDestination::Remote,
        })
    }
}
