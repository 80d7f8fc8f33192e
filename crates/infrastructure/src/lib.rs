//! Infrastructure layer - adapters behind the domain's collaborator traits
//!
//! Device-local storage (sqlite key-value store, offline queue), the remote
//! document-store client, the connectivity monitor, printer transports and
//! layered configuration loading.

pub mod config;
pub mod connectivity;
pub mod printer;
pub mod remote;
pub mod storage;

pub use connectivity::HttpConnectivityMonitor;
pub use remote::RestSessionStore;
pub use storage::{KvOfflineQueue, MemoryKvStore, SqliteKvStore};
