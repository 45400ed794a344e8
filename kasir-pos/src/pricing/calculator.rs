//! Cart totals calculator
//!
//! Order of operations: subtotal, then tier discount on the subtotal,
//! then tax on the discounted amount. Values stay exact `Decimal`s;
//! rounding happens only when a value is displayed ([`to_rupiah`]).

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use shared::models::{AppSettings, CartItem, Customer};

/// Computed totals for a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    /// Percentage applied (0-100)
    pub discount_rate: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

/// Sum of `price * quantity` over the cart
pub fn cart_subtotal(cart: &[CartItem]) -> Decimal {
    cart.iter()
        .map(|item| Decimal::from(item.price) * Decimal::from(item.quantity))
        .sum()
}

/// Discount percentage for an optional customer
pub fn discount_rate_for(customer: Option<&Customer>, settings: &AppSettings) -> Decimal {
    customer
        .map(|c| settings.tier_discount(c.tier))
        .unwrap_or(Decimal::ZERO)
}

/// Tax percentage in effect (zero when tax is disabled)
pub fn effective_tax_rate(settings: &AppSettings) -> Decimal {
    if settings.enable_tax && settings.tax_rate > Decimal::ZERO {
        settings.tax_rate
    } else {
        Decimal::ZERO
    }
}

/// Calculate cart totals
///
/// Same inputs always give the same summary; `settings` is only read.
pub fn calculate_checkout(
    cart: &[CartItem],
    customer: Option<&Customer>,
    settings: &AppSettings,
) -> CheckoutSummary {
    let subtotal = cart_subtotal(cart);
    let discount_rate = discount_rate_for(customer, settings);
    let discount_amount = subtotal * discount_rate / Decimal::ONE_HUNDRED;

    let taxable = subtotal - discount_amount;
    let tax_amount = taxable * effective_tax_rate(settings) / Decimal::ONE_HUNDRED;

    CheckoutSummary {
        subtotal,
        discount_rate,
        discount_amount,
        tax_amount,
        total: taxable + tax_amount,
    }
}

/// Round to whole Rupiah, half away from zero
pub fn to_rupiah(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_else(|| {
            tracing::error!(value = %value, "Amount out of i64 range, defaulting to zero");
            0
        })
}
