//! Debt Book Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebtEntryKind {
    /// Credit sale, increases the balance
    Charge,
    /// Repayment, decreases the balance
    Payment,
}

/// One movement in a customer's store-credit ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtEntry {
    pub id: String,
    pub customer_id: String,
    pub kind: DebtEntryKind,
    /// Always positive; the sign comes from `kind`
    pub amount: Decimal,
    pub transaction_id: Option<String>,
    pub note: Option<String>,
    pub created_at: i64,
}

impl DebtEntry {
    /// Signed effect on the balance
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            DebtEntryKind::Charge => self.amount,
            DebtEntryKind::Payment => -self.amount,
        }
    }
}

/// Outstanding balance for one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtBalance {
    pub customer_id: String,
    pub customer_name: String,
    pub balance: Decimal,
}
