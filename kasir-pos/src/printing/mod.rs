//! Receipt printing
//!
//! Glue between the receipt renderer and the printer transport.

mod service;

pub use service::{PrintServiceError, PrintServiceResult, ReceiptPrintService};
