//! Debt Book Module
//!
//! Store-credit ledger per customer. Credit sales add Charge entries at
//! checkout; repayments are recorded here. The balance is always derived
//! from the entries, never stored.

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::models::{DebtBalance, DebtEntry, DebtEntryKind};
use shared::util::{new_id, now_millis};
use shared::{AppError, ErrorCode};
use thiserror::Error;
use tracing::{info, instrument};

use crate::audit_log;
use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum DebtError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("Payment {amount} exceeds outstanding balance {balance}")]
    Overpayment { amount: Decimal, balance: Decimal },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DebtError> for AppError {
    fn from(err: DebtError) -> Self {
        match err {
            DebtError::CustomerNotFound(id) => {
                AppError::new(ErrorCode::CustomerNotFound).with_detail("customer_id", id)
            }
            DebtError::InvalidAmount(amount) => {
                AppError::new(ErrorCode::InvalidAmount).with_detail("amount", amount.to_string())
            }
            DebtError::Overpayment { amount, balance } => AppError::new(ErrorCode::Overpayment)
                .with_detail("amount", amount.to_string())
                .with_detail("balance", balance.to_string()),
            DebtError::Store(e) => e.into(),
        }
    }
}

fn sum_entries<'a>(entries: impl IntoIterator<Item = &'a DebtEntry>) -> Decimal {
    entries.into_iter().map(DebtEntry::signed_amount).sum()
}

#[derive(Clone)]
pub struct DebtBook {
    store: Store,
}

impl DebtBook {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Charges minus payments for one customer
    pub fn balance(&self, customer_id: &str) -> Result<Decimal, DebtError> {
        Ok(sum_entries(&self.store.get_debt_entries(customer_id)?))
    }

    /// Ledger entries for one customer, newest first
    pub fn entries(&self, customer_id: &str) -> Result<Vec<DebtEntry>, DebtError> {
        Ok(self.store.get_debt_entries(customer_id)?)
    }

    /// Record a repayment
    ///
    /// The amount must be positive and may not exceed the current balance.
    /// The balance is read through the same write transaction that stores
    /// the payment, so concurrent payments cannot overdraw it.
    #[instrument(skip(self, note))]
    pub fn record_payment(
        &self,
        customer_id: &str,
        amount: Decimal,
        note: Option<String>,
    ) -> Result<DebtEntry, DebtError> {
        if amount <= Decimal::ZERO {
            return Err(DebtError::InvalidAmount(amount));
        }
        if self.store.get_customer(customer_id)?.is_none() {
            return Err(DebtError::CustomerNotFound(customer_id.to_string()));
        }

        let txn = self.store.begin_write()?;
        let balance = sum_entries(&self.store.debt_entries_in(&txn, customer_id)?);
        if amount > balance {
            return Err(DebtError::Overpayment { amount, balance });
        }

        let entry = DebtEntry {
            id: new_id(),
            customer_id: customer_id.to_string(),
            kind: DebtEntryKind::Payment,
            amount,
            transaction_id: None,
            note,
            created_at: now_millis(),
        };

        self.store.store_debt_entry(&txn, &entry)?;
        txn.commit().map_err(StoreError::from)?;

        info!(remaining = %(balance - amount), "Debt payment recorded");
        audit_log!(
            "till",
            "debt_payment",
            format!("customer:{}", customer_id),
            format!("amount={}", amount)
        );

        Ok(entry)
    }

    /// Customers who still owe money, largest balance first
    pub fn outstanding(&self) -> Result<Vec<DebtBalance>, DebtError> {
        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for entry in self.store.get_all_debt_entries()? {
            *totals.entry(entry.customer_id.clone()).or_default() += entry.signed_amount();
        }

        let mut balances = Vec::new();
        for (customer_id, balance) in totals {
            if balance <= Decimal::ZERO {
                continue;
            }
            let customer_name = self
                .store
                .get_customer(&customer_id)?
                .map(|c| c.name)
                .unwrap_or_default();
            balances.push(DebtBalance {
                customer_id,
                customer_name,
                balance,
            });
        }

        balances.sort_by(|a, b| {
            b.balance
                .cmp(&a.balance)
                .then_with(|| a.customer_name.cmp(&b.customer_name))
        });
        Ok(balances)
    }
}
