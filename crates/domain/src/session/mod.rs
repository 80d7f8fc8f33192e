mod draft;
mod entity;
mod item;
mod payment;
mod repository;
mod session_id;

pub use draft::{EditContext, SessionDraft};
pub use entity::{SessionData, WeighingSession};
pub use item::WeighingItem;
pub use payment::PaymentStatus;
pub use repository::{OfflineQueue, SessionStore};
pub use session_id::{OFFLINE_PREFIX, SessionId};
