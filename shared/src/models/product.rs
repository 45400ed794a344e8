//! Product Model

use serde::{Deserialize, Serialize};

/// A selling unit other than the base unit (e.g. "pack" of 10 base "pcs")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUnit {
    pub name: String,
    /// Selling price in whole Rupiah
    pub price: i64,
    /// Base units consumed per unit sold
    pub conversion: i64,
}

/// Product entity
///
/// Stock is tracked in the base unit only. Selling in a larger unit
/// depletes `quantity * conversion` base units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub barcode: Option<String>,
    pub category: Option<String>,
    /// Name of the smallest stock-tracked unit ("pcs", "kg", ...)
    pub base_unit: String,
    /// Price of one base unit
    pub price: i64,
    /// Cost basis per base unit
    pub buy_price: i64,
    /// Stock in base units (may go negative when oversold)
    pub stock: i64,
    #[serde(default)]
    pub units: Vec<ProductUnit>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Resolved selling unit for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellingUnit<'a> {
    pub name: &'a str,
    pub price: i64,
    pub conversion: i64,
}

impl Product {
    /// Resolve a selling unit by name (case-insensitive); the base unit
    /// resolves with conversion 1.
    pub fn selling_unit(&self, name: &str) -> Option<SellingUnit<'_>> {
        if self.base_unit.eq_ignore_ascii_case(name) {
            return Some(SellingUnit {
                name: &self.base_unit,
                price: self.price,
                conversion: 1,
            });
        }
        self.units
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(name))
            .map(|u| SellingUnit {
                name: &u.name,
                price: u.price,
                conversion: u.conversion,
            })
    }
}
