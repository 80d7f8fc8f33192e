use crate::error::DomainError;
use crate::session::{SessionData, SessionId, WeighingSession};
use async_trait::async_trait;
use tokio::sync::watch;

/// Remote document collection of weighing sessions.
///
/// The minimal contract the core depends on: create assigns a fresh opaque
/// identity, update writes under a caller-supplied key, and a live
/// subscription delivers snapshots ordered by creation time descending.
/// Document bodies never contain an id field.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new document; the store assigns and returns its id
    async fn create(&self, data: &SessionData) -> Result<String, DomainError>;

    /// Overwrite the document stored under `id`
    async fn update(&self, id: &str, data: &SessionData) -> Result<(), DomainError>;

    /// One-shot snapshot, newest first
    async fn fetch_all(&self) -> Result<Vec<WeighingSession>, DomainError>;

    /// Live subscription; the receiver holds the latest snapshot
    fn watch(&self) -> watch::Receiver<Vec<WeighingSession>>;
}

/// Durable device-local queue of sessions awaiting upload.
///
/// Unordered; callers must not assume FIFO. Persistence failures surface as
/// `DomainError::Storage` and are never retried here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OfflineQueue: Send + Sync {
    /// Upsert by id: replace an existing entry, else append
    async fn save(&self, session: &WeighingSession) -> Result<(), DomainError>;

    /// Snapshot of every queued session
    async fn list(&self) -> Result<Vec<WeighingSession>, DomainError>;

    /// Remove by id; absent entries are a no-op, not an error
    async fn remove(&self, id: &SessionId) -> Result<(), DomainError>;

    /// Drop all entries
    async fn clear(&self) -> Result<(), DomainError>;

    /// Number of sessions awaiting upload
    async fn pending_count(&self) -> Result<usize, DomainError>;
}
