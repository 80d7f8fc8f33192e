use domain::printer::PrinterConnection;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{error, info, warn};

/// Owns the printer link and drains rendered receipts off a channel.
///
/// Receipts arrive as finished ESC/POS byte jobs. On a write failure the
/// manager reconnects and retries the job once; a second failure drops it
/// (the operator can reprint from the session list).
pub struct PrinterManager {
    connection: Box<dyn PrinterConnection>,
    receipt_rx: mpsc::Receiver<Vec<u8>>,
    reconnect_interval: Duration,
}

impl PrinterManager {
    pub fn new(connection: Box<dyn PrinterConnection>, receipt_rx: mpsc::Receiver<Vec<u8>>) -> Self {
        Self {
            connection,
            receipt_rx,
            reconnect_interval: Duration::from_secs(5),
        }
    }

    pub async fn run(mut self) {
        info!("🖨️ Printer manager started");

        // Initial connection attempt
        self.connect_loop().await;

        while let Some(job) = self.receipt_rx.recv().await {
            if !self.connection.is_connected().await {
                warn!(
                    "⚠️ Printer disconnected before job ({} bytes). Reconnecting...",
                    job.len()
                );
                self.connect_loop().await;
            }

            match self.connection.send_commands(&job).await {
                Ok(_) => info!("✅ Receipt printed ({} bytes)", job.len()),
                Err(e) => {
                    error!("❌ Print failed: {}. Reconnecting for one retry...", e);
                    self.connect_loop().await;
                    match self.connection.send_commands(&job).await {
                        Ok(_) => info!("✅ Retry succeeded"),
                        Err(e2) => error!("❌ Retry failed: {}. Receipt dropped.", e2),
                    }
                }
            }
        }

        // All senders dropped: shut down gracefully
        info!("🖨️ Receipt channel closed. Printer manager shutting down.");
    }

    async fn connect_loop(&mut self) {
        if self.connection.is_connected().await {
            return;
        }

        warn!("🔌 Connecting to printer...");
        loop {
            match self.connection.connect().await {
                Ok(_) => {
                    info!("✅ Printer connected");
                    break;
                }
                Err(e) => {
                    error!(
                        "❌ Connection failed: {}. Retrying in {:?}...",
                        e, self.reconnect_interval
                    );
                    sleep(self.reconnect_interval).await;
                }
            }
        }
    }
}
