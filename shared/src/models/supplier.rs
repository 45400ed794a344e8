//! Supplier & Purchase Models

use serde::{Deserialize, Serialize};

/// Supplier entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: i64,
}

/// One received line of a purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseLine {
    pub product_id: String,
    pub unit_name: String,
    pub quantity: u32,
    /// Base units per purchased unit
    pub conversion: i64,
    /// Cost per purchased unit in whole Rupiah
    pub unit_cost: i64,
}

impl PurchaseLine {
    pub fn base_quantity(&self) -> i64 {
        i64::from(self.quantity) * self.conversion
    }

    pub fn line_cost(&self) -> i64 {
        self.unit_cost * i64::from(self.quantity)
    }
}

/// Goods received from a supplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub supplier_id: String,
    pub lines: Vec<PurchaseLine>,
    pub total_cost: i64,
    pub note: Option<String>,
    pub created_at: i64,
}
