//! Cart and Transaction Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::customer::CustomerRef;

/// One line of an active cart
///
/// Ephemeral while the cart is open; copied verbatim into the
/// transaction snapshot at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub product_name: String,
    pub unit_name: String,
    /// Unit price in whole Rupiah
    pub price: i64,
    /// Cost basis; not used in totals
    pub buy_price: i64,
    pub quantity: u32,
    /// Base units per unit sold
    pub conversion: i64,
}

impl CartItem {
    /// `price * quantity`
    pub fn line_total(&self) -> i64 {
        self.price * i64::from(self.quantity)
    }

    /// Base units this line removes from stock
    pub fn base_quantity(&self) -> i64 {
        i64::from(self.quantity) * self.conversion
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
    Qris,
    /// Credit sale recorded in the debt book
    Debt,
}

impl PaymentMethod {
    /// Label printed on receipts
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Tunai",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Qris => "QRIS",
            PaymentMethod::Debt => "Kasbon",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Completed sale, immutable once created
///
/// `total_amount = (subtotal - discount_amount) + tax_amount`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Unix millis
    pub timestamp: i64,
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub cash_paid: Decimal,
    pub change: Decimal,
    pub customer: Option<CustomerRef>,
    /// Amount put on the customer's tab (credit sales only)
    #[serde(default)]
    pub debt_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_totals() {
        let item = CartItem {
            product_id: "p-1".to_string(),
            product_name: "Aqua 600ml".to_string(),
            unit_name: "Pack".to_string(),
            price: 20_000,
            buy_price: 2_500,
            quantity: 3,
            conversion: 6,
        };
        assert_eq!(item.line_total(), 60_000);
        assert_eq!(item.base_quantity(), 18);
    }

    #[test]
    fn test_payment_method_serde() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Qris).unwrap(),
            "\"QRIS\""
        );
        let method: PaymentMethod = serde_json::from_str("\"DEBT\"").unwrap();
        assert_eq!(method, PaymentMethod::Debt);
        assert_eq!(method.to_string(), "Kasbon");
    }
}
