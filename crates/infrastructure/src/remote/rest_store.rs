use std::time::Duration;

use async_trait::async_trait;
use domain::DomainError;
use domain::session::{SessionData, SessionStore, WeighingSession};
use serde::Deserialize;
use tokio::sync::watch;
use tracing::{info, warn};

const COLLECTION: &str = "weighing_sessions";

#[derive(Deserialize)]
struct CreatedDocument {
    id: String,
}

/// Client for the remote session collection.
///
/// Create assigns identity server-side, update writes under a given key, and
/// the listing comes back ordered by creation time descending. The live
/// subscription is a background poll publishing snapshots on a watch
/// channel; receivers always hold the latest one.
#[derive(Clone)]
pub struct RestSessionStore {
    client: reqwest::Client,
    base_url: String,
    snapshot_tx: watch::Sender<Vec<WeighingSession>>,
}

impl RestSessionStore {
    pub fn new(base_url: impl Into<String>, poll_interval: Duration) -> Self {
        let (snapshot_tx, _) = watch::channel(Vec::new());
        let store = Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            snapshot_tx,
        };
        store.start_poller(poll_interval);
        store
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, COLLECTION)
    }

    fn start_poller(&self, interval: Duration) {
        let store = self.clone();
        tokio::spawn(async move {
            info!("🔄 Starting remote snapshot poller...");
            loop {
                tokio::time::sleep(interval).await;

                // Nobody subscribed yet; skip the round trip
                if store.snapshot_tx.receiver_count() == 0 {
                    continue;
                }

                match store.fetch_all().await {
                    Ok(snapshot) => {
                        let _ = store.snapshot_tx.send(snapshot);
                    }
                    Err(e) => warn!("Remote snapshot poll failed: {}", e),
                }
            }
        });
    }

    fn remote_err(e: reqwest::Error) -> DomainError {
        DomainError::Remote(e.to_string())
    }
}

#[async_trait]
impl SessionStore for RestSessionStore {
    async fn create(&self, data: &SessionData) -> Result<String, DomainError> {
        // SessionData carries no id field: identity is assigned server-side
        let created: CreatedDocument = self
            .client
            .post(self.collection_url())
            .json(data)
            .send()
            .await
            .map_err(Self::remote_err)?
            .error_for_status()
            .map_err(Self::remote_err)?
            .json()
            .await
            .map_err(Self::remote_err)?;
        Ok(created.id)
    }

    async fn update(&self, id: &str, data: &SessionData) -> Result<(), DomainError> {
        self.client
            .put(format!("{}/{}", self.collection_url(), id))
            .json(data)
            .send()
            .await
            .map_err(Self::remote_err)?
            .error_for_status()
            .map_err(Self::remote_err)?;
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<WeighingSession>, DomainError> {
        self.client
            .get(self.collection_url())
            .query(&[("order", "createdAt:desc")])
            .send()
            .await
            .map_err(Self::remote_err)?
            .error_for_status()
            .map_err(Self::remote_err)?
            .json()
            .await
            .map_err(Self::remote_err)
    }

    fn watch(&self) -> watch::Receiver<Vec<WeighingSession>> {
        self.snapshot_tx.subscribe()
    }
}
