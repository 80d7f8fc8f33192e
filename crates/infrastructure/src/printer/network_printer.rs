use async_trait::async_trait;
use domain::printer::{PrinterConnection, PrinterError};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{error, info};

/// Receipt printer reachable over raw TCP (JetDirect port 9100).
///
/// Bluetooth thermal printers on a serial-over-TCP bridge look identical
/// from here: connect, write the rendered bytes, flush.
pub struct NetworkPrinter {
    address: String,
    stream: Option<TcpStream>,
    connect_timeout: Duration,
}

impl NetworkPrinter {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            address: format!("{}:{}", host, port),
            stream: None,
            connect_timeout: Duration::from_secs(5),
        }
    }
}

#[async_trait]
impl PrinterConnection for NetworkPrinter {
    async fn connect(&mut self) -> Result<(), PrinterError> {
        info!("Connecting to receipt printer at {}", self.address);
        match tokio::time::timeout(self.connect_timeout, TcpStream::connect(&self.address)).await {
            Ok(Ok(stream)) => {
                info!("Receipt printer connected");
                self.stream = Some(stream);
                Ok(())
            }
            Ok(Err(e)) => Err(PrinterError::ConnectionFailed(e.to_string())),
            Err(_) => Err(PrinterError::ConnectionFailed(
                "Connection timed out".to_string(),
            )),
        }
    }

    async fn disconnect(&mut self) -> Result<(), PrinterError> {
        if let Some(mut stream) = self.stream.take() {
            let _ = stream.shutdown().await;
        }
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn send_commands(&mut self, commands: &[u8]) -> Result<(), PrinterError> {
        let Some(stream) = &mut self.stream else {
            return Err(PrinterError::NotConnected);
        };

        match stream.write_all(commands).await {
            Ok(_) => {
                let _ = stream.flush().await;
                Ok(())
            }
            Err(e) => {
                error!("Failed to write receipt to printer: {}", e);
                self.stream = None; // Invalidate connection
                Err(PrinterError::WriteFailed(e.to_string()))
            }
        }
    }
}
