//! Receipt print service - renders a transaction and sends it to a printer

use kasir_printer::{ByteChannel, ChunkConfig, PrintError, SendReport, send_chunked};
use shared::models::Transaction;
use shared::{AppError, ErrorCode};
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::receipt::render_receipt;
use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum PrintServiceError {
    #[error("Print error: {0}")]
    Print(#[from] PrintError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("No transactions recorded yet")]
    NothingToPrint,
}

pub type PrintServiceResult<T> = Result<T, PrintServiceError>;

impl From<PrintServiceError> for AppError {
    fn from(err: PrintServiceError) -> Self {
        match err {
            PrintServiceError::Print(PrintError::NotConnected) => {
                AppError::new(ErrorCode::PrinterNotConnected)
            }
            PrintServiceError::Print(e) => {
                AppError::with_message(ErrorCode::PrintFailed, e.to_string())
            }
            PrintServiceError::Store(e) => e.into(),
            PrintServiceError::TransactionNotFound(id) => {
                AppError::not_found(format!("Transaction {}", id))
            }
            PrintServiceError::NothingToPrint => AppError::not_found("Transaction"),
        }
    }
}

/// Renders receipts and pushes them through a [`ByteChannel`]
///
/// A failed send is logged and returned untouched so the caller can fall
/// back to another way of handing out the receipt.
pub struct ReceiptPrintService<C: ByteChannel> {
    store: Store,
    channel: C,
    chunk: ChunkConfig,
}

impl<C: ByteChannel> ReceiptPrintService<C> {
    pub fn new(store: Store, channel: C, chunk: ChunkConfig) -> Self {
        Self {
            store,
            channel,
            chunk,
        }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Print a receipt for `tx` using the current settings
    #[instrument(skip(self, tx), fields(transaction_id = %tx.id))]
    pub async fn print_transaction(&mut self, tx: &Transaction) -> PrintServiceResult<SendReport> {
        let settings = self.store.get_settings()?;
        let data = render_receipt(tx, &settings);

        match send_chunked(&mut self.channel, &data, &self.chunk).await {
            Ok(report) => {
                info!(bytes = report.bytes, chunks = report.chunks, "Receipt printed");
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "Receipt print failed");
                Err(e.into())
            }
        }
    }

    /// Reprint a stored transaction, or the latest one when `id` is `None`
    pub async fn reprint(
        &mut self,
        id: Option<&str>,
    ) -> PrintServiceResult<(Transaction, SendReport)> {
        let tx = match id {
            Some(id) => self
                .store
                .get_transaction(id)?
                .ok_or_else(|| PrintServiceError::TransactionNotFound(id.to_string()))?,
            None => self
                .store
                .latest_transaction()?
                .ok_or(PrintServiceError::NothingToPrint)?,
        };
        let report = self.print_transaction(&tx).await?;
        Ok((tx, report))
    }
}
