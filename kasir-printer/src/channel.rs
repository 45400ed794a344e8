//! Byte channels for sending ESC/POS data
//!
//! A channel is anything that accepts raw bytes in order: a BLE
//! characteristic, a serial port, a raw TCP socket. Only the TCP variant
//! lives here; other transports implement [`ByteChannel`] at the call site.

use crate::error::{PrintError, PrintResult};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{info, instrument, warn};

/// Ordered, byte-oriented output to a printer
#[allow(async_fn_in_trait)]
pub trait ByteChannel {
    /// Whether a printer is currently attached
    fn is_connected(&self) -> bool;

    /// Write one block of bytes; resolves once the channel accepted it
    async fn write_value(&mut self, bytes: &[u8]) -> PrintResult<()>;
}

/// Raw TCP printer channel (port 9100)
///
/// Most network thermal printers accept raw ESC/POS on port 9100.
#[derive(Debug)]
pub struct TcpChannel {
    addr: SocketAddr,
    timeout: Duration,
    stream: Option<TcpStream>,
}

impl TcpChannel {
    /// Create a channel for `host:port` (not yet connected)
    pub fn new(host: &str, port: u16) -> PrintResult<Self> {
        Self::from_addr(&format!("{}:{}", host, port))
    }

    /// Create from a socket address string (e.g., "192.168.1.100:9100")
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Invalid address: {}", addr)))?;

        Ok(Self {
            addr,
            timeout: Duration::from_secs(5),
            stream: None,
        })
    }

    /// Set connection timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the printer address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Open the TCP connection
    #[instrument(skip(self), fields(addr = %self.addr))]
    pub async fn connect(&mut self) -> PrintResult<()> {
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connection timeout: {}", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))?;

        info!("Connected to printer");
        self.stream = Some(stream);
        Ok(())
    }

    /// Close the connection (no-op when not connected)
    pub async fn disconnect(&mut self) {
        if let Some(mut stream) = self.stream.take()
            && let Err(e) = stream.shutdown().await
        {
            warn!(addr = %self.addr, error = %e, "Printer shutdown failed");
        }
    }
}

impl ByteChannel for TcpChannel {
    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn write_value(&mut self, bytes: &[u8]) -> PrintResult<()> {
        let stream = self.stream.as_mut().ok_or(PrintError::NotConnected)?;

        let result = async {
            stream.write_all(bytes).await?;
            stream.flush().await
        }
        .await;

        if let Err(e) = result {
            // A broken socket is never reused
            self.stream = None;
            return Err(PrintError::Io(e));
        }
        Ok(())
    }
}
