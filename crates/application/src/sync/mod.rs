mod reconciler;

pub use reconciler::{Reconciler, SyncOutcome, SyncReport};
