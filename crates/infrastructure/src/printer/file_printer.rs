use async_trait::async_trait;
use domain::printer::{PrinterConnection, PrinterError};
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

/// Receipt spool on disk or a network share.
///
/// Each receipt is appended in one open-write-close cycle so nothing holds
/// a lock on a shared spool file between jobs.
pub struct FilePrinter {
    path: PathBuf,
    connected: bool,
}

impl FilePrinter {
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(path),
            connected: false,
        }
    }
}

#[async_trait]
impl PrinterConnection for FilePrinter {
    async fn connect(&mut self) -> Result<(), PrinterError> {
        info!("Spooling receipts to {:?}", self.path);
        self.connected = true;
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<(), PrinterError> {
        self.connected = false;
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        self.connected
    }

    async fn send_commands(&mut self, commands: &[u8]) -> Result<(), PrinterError> {
        if !self.connected {
            return Err(PrinterError::NotConnected);
        }

        match OpenOptions::new()
            .write(true)
            .create(true)
            .append(true)
            .open(&self.path)
            .await
        {
            Ok(mut file) => {
                if let Err(e) = file.write_all(commands).await {
                    error!("Failed to write receipt to spool: {}", e);
                    return Err(PrinterError::WriteFailed(e.to_string()));
                }
                if let Err(e) = file.flush().await {
                    error!("Failed to flush receipt spool: {}", e);
                    return Err(PrinterError::WriteFailed(e.to_string()));
                }
                Ok(())
            }
            Err(e) => {
                error!("Failed to open receipt spool {:?}: {}", self.path, e);
                Err(PrinterError::ConnectionFailed(e.to_string()))
            }
        }
    }
}
