use crate::error::DomainError;
use async_trait::async_trait;

/// Device-local string-to-string store the offline queue rides on.
///
/// Implementations must persist durably across restarts; read/write failures
/// surface as `DomainError::Storage` so callers can decide whether to retry
/// the whole user action.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}
