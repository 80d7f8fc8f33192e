use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use domain::connectivity::ConnectivityProbe;
use tokio::sync::watch;
use tracing::{info, warn};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Connectivity signal backed by polling the remote health endpoint.
///
/// Holds the last observed state as an atomic snapshot and broadcasts
/// transitions on a watch channel. Consumers read the snapshot at decision
/// time; nothing blocks waiting for a change.
#[derive(Clone)]
pub struct HttpConnectivityMonitor {
    client: reqwest::Client,
    health_url: String,
    online: Arc<AtomicBool>,
    tx: Arc<watch::Sender<bool>>,
}

impl HttpConnectivityMonitor {
    pub fn new(base_url: &str) -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            client: reqwest::Client::new(),
            health_url: format!("{}/health", base_url.trim_end_matches('/')),
            online: Arc::new(AtomicBool::new(false)),
            tx: Arc::new(tx),
        }
    }

    /// Probe immediately and record the result. Used at startup and before
    /// one-shot operations that should not wait for the next poll tick.
    pub async fn probe_now(&self) -> bool {
        let reachable = self
            .client
            .get(&self.health_url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false);
        self.record(reachable);
        reachable
    }

    /// Spawn the background probe loop.
    pub fn start(&self, interval: Duration) {
        let monitor = self.clone();
        tokio::spawn(async move {
            info!("📡 Starting connectivity probe ({}s)", interval.as_secs());
            loop {
                tokio::time::sleep(interval).await;
                monitor.probe_now().await;
            }
        });
    }

    fn record(&self, reachable: bool) {
        let was = self.online.swap(reachable, Ordering::Relaxed);
        if was != reachable {
            if reachable {
                info!("📶 Connectivity restored");
            } else {
                warn!("📴 Connectivity lost");
            }
            let _ = self.tx.send(reachable);
        }
    }
}

impl ConnectivityProbe for HttpConnectivityMonitor {
    fn is_connected(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}
