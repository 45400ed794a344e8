//! Checkout Module
//!
//! Turns a priced cart into a persisted [`Transaction`](shared::models::Transaction):
//! payment validation, credit sales, stock decrement and the debt charge.

mod error;
mod payment;
mod service;

pub use error::CheckoutError;
pub use payment::{split_credit_payment, validate_payment};
pub use service::{CheckoutRequest, CheckoutService, cart_item};
