//! Data models
//!
//! Persisted as JSON values by kasir-pos. All IDs are UUID strings and all
//! timestamps are unix millis.

pub mod customer;
pub mod debt;
pub mod product;
pub mod role;
pub mod settings;
pub mod store_info;
pub mod supplier;
pub mod transaction;

// Re-exports
pub use customer::*;
pub use debt::*;
pub use product::*;
pub use role::*;
pub use settings::*;
pub use store_info::*;
pub use supplier::*;
pub use transaction::*;
