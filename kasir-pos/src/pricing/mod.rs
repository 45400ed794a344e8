//! Checkout Pricing Module
//!
//! Pure cart arithmetic: subtotal, tier discount, tax and total.
//! Nothing here touches the store.

mod calculator;

pub use calculator::*;
