mod service;

pub use service::{SaveDestination, SavedSession, SessionService};
