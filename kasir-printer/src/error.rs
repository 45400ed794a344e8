//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Network connection error
    #[error("Connection failed: {0}")]
    Connection(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Channel is not connected to a printer
    #[error("Printer not connected")]
    NotConnected,

    /// Timeout waiting for printer
    #[error("Timeout: {0}")]
    Timeout(String),

    /// A chunk write failed; remaining chunks were not sent
    #[error("Write failed at chunk {chunk}/{total}: {reason}")]
    WriteFailed {
        chunk: usize,
        total: usize,
        reason: String,
    },

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
