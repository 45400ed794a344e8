//! Shared types for Kasir
//!
//! Domain models (catalog, customers, settings, transactions, debt book,
//! suppliers, roles), the caller-facing error type, and small id/time
//! helpers used by every crate in the workspace.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};
