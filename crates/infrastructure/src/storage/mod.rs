mod memory_kv;
mod offline_queue;
mod sqlite_kv;

pub use memory_kv::MemoryKvStore;
pub use offline_queue::{KvOfflineQueue, QUEUE_KEY};
pub use sqlite_kv::SqliteKvStore;
