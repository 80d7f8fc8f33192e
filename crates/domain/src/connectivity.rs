use tokio::sync::watch;

/// Live connectivity signal.
///
/// `is_connected` is a point-in-time snapshot: every sync attempt decides on
/// the value it sees and nothing blocks waiting for a transition. The watch
/// subscription lets reactive consumers re-evaluate on change.
pub trait ConnectivityProbe: Send + Sync {
    fn is_connected(&self) -> bool;

    fn subscribe(&self) -> watch::Receiver<bool>;
}
