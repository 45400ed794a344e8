//! Receipt Module
//!
//! Lays out a transaction on thermal paper. Rendering is pure and never
//! fails; transport lives in [`crate::printing`].

mod format;
mod renderer;

pub use format::{format_currency, format_rupiah, format_timestamp};
pub use renderer::ReceiptRenderer;

use shared::models::{AppSettings, Transaction};

/// Render at the paper width configured in `settings`
pub fn render_receipt(tx: &Transaction, settings: &AppSettings) -> Vec<u8> {
    ReceiptRenderer::new(tx, settings).render()
}
