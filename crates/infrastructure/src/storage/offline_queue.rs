use std::sync::Arc;

use async_trait::async_trait;
use domain::DomainError;
use domain::session::{OfflineQueue, SessionId, WeighingSession};
use domain::storage::KeyValueStore;
use tracing::warn;

/// Fixed key the whole queue is serialized under, as one JSON array.
pub const QUEUE_KEY: &str = "offline_weighing_sessions";

/// Offline session queue over a key-value store.
///
/// Unordered, single-writer. A stored value that no longer parses is logged
/// and treated as an empty queue rather than surfaced.
pub struct KvOfflineQueue {
    store: Arc<dyn KeyValueStore>,
}

impl KvOfflineQueue {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load(&self) -> Result<Vec<WeighingSession>, DomainError> {
        match self.store.get(QUEUE_KEY).await? {
            None => Ok(Vec::new()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(sessions) => Ok(sessions),
                Err(e) => {
                    warn!("Stored offline queue is unreadable ({}). Treating as empty.", e);
                    Ok(Vec::new())
                }
            },
        }
    }

    async fn persist(&self, sessions: &[WeighingSession]) -> Result<(), DomainError> {
        let raw = serde_json::to_string(sessions)
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        self.store.set(QUEUE_KEY, &raw).await
    }
}

#[async_trait]
impl OfflineQueue for KvOfflineQueue {
    async fn save(&self, session: &WeighingSession) -> Result<(), DomainError> {
        let mut sessions = self.load().await?;
        match sessions.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => *existing = session.clone(),
            None => sessions.push(session.clone()),
        }
        self.persist(&sessions).await
    }

    async fn list(&self) -> Result<Vec<WeighingSession>, DomainError> {
        self.load().await
    }

    async fn remove(&self, id: &SessionId) -> Result<(), DomainError> {
        let mut sessions = self.load().await?;
        sessions.retain(|s| s.id != *id);
        self.persist(&sessions).await
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.store.remove(QUEUE_KEY).await
    }

    async fn pending_count(&self) -> Result<usize, DomainError> {
        Ok(self.load().await?.len())
    }
}
