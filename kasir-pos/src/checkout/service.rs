//! Checkout: cart -> persisted transaction

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{
    CartItem, CustomerRef, DebtEntry, DebtEntryKind, PaymentMethod, Product, Transaction,
};
use shared::util::{new_id, now_millis, short_id};
use tracing::{info, instrument, warn};

use super::{CheckoutError, split_credit_payment, validate_payment};
use crate::audit_log;
use crate::pricing::calculate_checkout;
use crate::store::{Store, StoreError};

/// Everything the till submits at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CartItem>,
    pub customer_id: Option<String>,
    pub payment_method: PaymentMethod,
    /// Cash tendered; the down payment for credit sales
    pub cash_paid: Decimal,
}

/// Build a cart line from a product and one of its selling units
pub fn cart_item(product: &Product, unit: &str, quantity: u32) -> Result<CartItem, CheckoutError> {
    if quantity == 0 {
        return Err(CheckoutError::InvalidQuantity {
            product_id: product.id.clone(),
        });
    }
    let selling = product
        .selling_unit(unit)
        .ok_or_else(|| CheckoutError::UnitNotFound {
            product_id: product.id.clone(),
            unit: unit.to_string(),
        })?;

    Ok(CartItem {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        unit_name: selling.name.to_string(),
        price: selling.price,
        buy_price: product.buy_price * selling.conversion,
        quantity,
        conversion: selling.conversion,
    })
}

#[derive(Clone)]
pub struct CheckoutService {
    store: Store,
}

impl CheckoutService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Price the cart, take payment and persist the sale
    ///
    /// The transaction record, stock decrements and any debt charge are
    /// written in one store transaction. Nothing is persisted on error.
    #[instrument(skip(self, request), fields(items = request.items.len(), method = %request.payment_method))]
    pub fn checkout(&self, request: CheckoutRequest) -> Result<Transaction, CheckoutError> {
        if request.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if let Some(item) = request
            .items
            .iter()
            .find(|i| i.quantity == 0 || i.conversion < 1)
        {
            return Err(CheckoutError::InvalidQuantity {
                product_id: item.product_id.clone(),
            });
        }
        if let Some(item) = request
            .items
            .iter()
            .find(|i| i.price < 0 || i.buy_price < 0)
        {
            return Err(CheckoutError::InvalidPrice {
                product_id: item.product_id.clone(),
            });
        }
        if request.cash_paid < Decimal::ZERO {
            return Err(CheckoutError::InvalidAmount(request.cash_paid));
        }

        let settings = self.store.get_settings()?;
        let customer = match &request.customer_id {
            Some(id) => Some(
                self.store
                    .get_customer(id)?
                    .ok_or_else(|| CheckoutError::CustomerNotFound(id.clone()))?,
            ),
            None => None,
        };

        let summary = calculate_checkout(&request.items, customer.as_ref(), &settings);

        let (change, debt_amount) = match request.payment_method {
            PaymentMethod::Debt => {
                if customer.is_none() {
                    return Err(CheckoutError::CustomerRequired);
                }
                split_credit_payment(summary.total, request.cash_paid)
            }
            _ => (validate_payment(summary.total, request.cash_paid)?, Decimal::ZERO),
        };

        let now = now_millis();
        let tx = Transaction {
            id: new_id(),
            timestamp: now,
            items: request.items,
            subtotal: summary.subtotal,
            discount_amount: summary.discount_amount,
            tax_amount: summary.tax_amount,
            total_amount: summary.total,
            payment_method: request.payment_method,
            cash_paid: request.cash_paid,
            change,
            customer: customer.as_ref().map(CustomerRef::from),
            debt_amount,
        };

        let charge = match &customer {
            Some(c) if debt_amount > Decimal::ZERO => Some(DebtEntry {
                id: new_id(),
                customer_id: c.id.clone(),
                kind: DebtEntryKind::Charge,
                amount: debt_amount,
                transaction_id: Some(tx.id.clone()),
                note: None,
                created_at: now,
            }),
            _ => None,
        };

        self.commit(&tx, charge.as_ref())?;

        info!(
            transaction_id = %tx.id,
            total = %tx.total_amount,
            debt = %tx.debt_amount,
            "Checkout completed"
        );
        audit_log!(
            "till",
            "checkout",
            format!("transaction:{}", short_id(&tx.id)),
            format!("total={} method={}", tx.total_amount, tx.payment_method)
        );

        Ok(tx)
    }

    fn commit(&self, tx: &Transaction, charge: Option<&DebtEntry>) -> Result<(), CheckoutError> {
        let txn = self.store.begin_write()?;

        for item in &tx.items {
            let product = self
                .store
                .adjust_stock(&txn, &item.product_id, -item.base_quantity())?;
            if product.stock < 0 {
                warn!(
                    product_id = %product.id,
                    stock = product.stock,
                    "Stock below zero after sale"
                );
            }
        }
        self.store.append_transaction(&txn, tx)?;
        if let Some(entry) = charge {
            self.store.store_debt_entry(&txn, entry)?;
        }

        txn.commit().map_err(StoreError::from)?;
        Ok(())
    }
}
