//! Paced, chunked transmission over a [`ByteChannel`]
//!
//! Small printers (BLE especially) drop data when their receive buffer
//! overruns. Data is split into fixed-size blocks, each write is awaited
//! before the next starts, and a short pause separates blocks. There is no
//! acknowledgment-based flow control and no resend: the first failing block
//! aborts the job.

use std::time::Duration;

use tracing::{debug, instrument, warn};

use crate::channel::ByteChannel;
use crate::error::{PrintError, PrintResult};

/// Default block size in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Default pause between blocks
pub const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(50);

/// Pacing parameters for one transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkConfig {
    pub chunk_size: usize,
    pub inter_chunk_delay: Duration,
    /// Upper bound for a single block write; `None` waits indefinitely
    pub chunk_timeout: Option<Duration>,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            inter_chunk_delay: DEFAULT_CHUNK_DELAY,
            chunk_timeout: None,
        }
    }
}

impl ChunkConfig {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.inter_chunk_delay = delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.chunk_timeout = timeout;
        self
    }

    /// Number of blocks `len` bytes split into
    pub fn chunk_count(&self, len: usize) -> usize {
        len.div_ceil(self.chunk_size.max(1))
    }
}

/// Outcome of a completed transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendReport {
    pub bytes: usize,
    pub chunks: usize,
}

/// Send `data` over `channel` block by block
///
/// Fails fast with [`PrintError::NotConnected`] before writing anything if
/// the channel has no printer, and with [`PrintError::WriteFailed`] naming
/// the 1-based block index when a write errors or times out.
#[instrument(skip(channel, data), fields(bytes = data.len(), chunk_size = config.chunk_size))]
pub async fn send_chunked<C: ByteChannel>(
    channel: &mut C,
    data: &[u8],
    config: &ChunkConfig,
) -> PrintResult<SendReport> {
    if config.chunk_size == 0 {
        return Err(PrintError::InvalidConfig(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    if !channel.is_connected() {
        return Err(PrintError::NotConnected);
    }

    let total = config.chunk_count(data.len());
    for (idx, chunk) in data.chunks(config.chunk_size).enumerate() {
        if idx > 0 && !config.inter_chunk_delay.is_zero() {
            tokio::time::sleep(config.inter_chunk_delay).await;
        }

        let written = match config.chunk_timeout {
            Some(limit) => match tokio::time::timeout(limit, channel.write_value(chunk)).await {
                Ok(result) => result,
                Err(_) => Err(PrintError::Timeout(format!("no response after {:?}", limit))),
            },
            None => channel.write_value(chunk).await,
        };

        if let Err(e) = written {
            warn!(chunk = idx + 1, total, error = %e, "Chunk write failed, aborting");
            return Err(PrintError::WriteFailed {
                chunk: idx + 1,
                total,
                reason: e.to_string(),
            });
        }
        debug!(chunk = idx + 1, total, len = chunk.len(), "Chunk sent");
    }

    Ok(SendReport {
        bytes: data.len(),
        chunks: total,
    })
}
