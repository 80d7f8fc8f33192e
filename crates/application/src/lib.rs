//! Application layer - Use cases and business workflows

pub mod printer;
pub mod search;
pub mod session;
pub mod sync;

pub use session::SessionService;
pub use sync::{Reconciler, SyncOutcome, SyncReport};
