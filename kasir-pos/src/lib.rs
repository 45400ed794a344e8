//! Kasir POS - small-shop point of sale core
//!
//! # Modules
//!
//! - **Pricing** (`pricing`): subtotal, tier discount, tax, total
//! - **Checkout** (`checkout`): payment, credit sales, atomic commit
//! - **Receipt** (`receipt`): ESC/POS receipt layout
//! - **Printing** (`printing`): render + chunked send to a printer
//! - **Store** (`store`): embedded redb persistence
//! - **Procurement** (`procurement`): goods received from suppliers
//! - **Debt** (`debt`): customer store-credit ledger
//! - **Auth** (`auth`): owner/staff PIN and permissions
//!
//! ```text
//! cart -> pricing -> checkout -> Transaction -> receipt -> printing -> ByteChannel
//!                        |
//!                      store
//! ```

pub mod auth;
pub mod checkout;
pub mod common;
pub mod core;
pub mod debt;
pub mod pricing;
pub mod printing;
pub mod procurement;
pub mod receipt;
pub mod store;

// Re-export public types
pub use auth::{AuthError, PinAuth, authorize};
pub use checkout::{CheckoutError, CheckoutRequest, CheckoutService};
pub use crate::core::Config;
pub use debt::{DebtBook, DebtError};
pub use pricing::{CheckoutSummary, calculate_checkout, to_rupiah};
pub use printing::{PrintServiceError, ReceiptPrintService};
pub use procurement::{ProcurementError, ProcurementService};
pub use receipt::{ReceiptRenderer, render_receipt};
pub use store::{Store, StoreError, StoreResult};

// Re-export logger functions
pub use common::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// Load `.env`, create the work dir and start logging
///
/// Returns the resolved configuration. Call from inside a tokio runtime to
/// get hourly log cleanup; without one, old logs are only cleaned here.
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;

    let json = config.log_json || config.is_production();
    init_logger_with_file(&config.log_level, json, Some(&config.log_dir()))?;

    tracing::debug!(work_dir = %config.work_dir, env = %config.environment, "Environment ready");
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
  _  __          _
 | |/ /__ _  ___(_)_ __
 | ' // _` |/ __| | '__|
 | . \ (_| |\__ \ | |
 |_|\_\__,_||___/_|_|
    "#
    );
}
