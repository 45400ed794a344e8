//! Procurement Module
//!
//! Receiving goods from a supplier: stock goes up by the base-unit
//! quantity and each product's buy price follows the latest cost.

use shared::models::{Purchase, PurchaseLine};
use shared::util::{new_id, now_millis, short_id};
use shared::{AppError, ErrorCode};
use thiserror::Error;
use tracing::{info, instrument};

use crate::audit_log;
use crate::store::{Store, StoreError};

#[derive(Debug, Error)]
pub enum ProcurementError {
    #[error("Purchase has no lines")]
    EmptyPurchase,

    #[error("Invalid line for product {product_id}: {reason}")]
    InvalidLine { product_id: String, reason: String },

    #[error("Supplier not found: {0}")]
    SupplierNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ProcurementError> for AppError {
    fn from(err: ProcurementError) -> Self {
        match err {
            ProcurementError::EmptyPurchase => AppError::validation("Purchase has no lines"),
            ProcurementError::InvalidLine { product_id, reason } => {
                AppError::with_message(ErrorCode::InvalidQuantity, reason)
                    .with_detail("product_id", product_id)
            }
            ProcurementError::SupplierNotFound(id) => {
                AppError::new(ErrorCode::SupplierNotFound).with_detail("supplier_id", id)
            }
            ProcurementError::Store(e) => e.into(),
        }
    }
}

#[derive(Clone)]
pub struct ProcurementService {
    store: Store,
}

impl ProcurementService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Record goods received from `supplier_id`
    ///
    /// In one write transaction: stores the purchase, adds
    /// `quantity * conversion` base units to each product and sets its buy
    /// price to `unit_cost / conversion` (integer division).
    #[instrument(skip(self, lines, note), fields(lines = lines.len()))]
    pub fn receive_purchase(
        &self,
        supplier_id: &str,
        lines: Vec<PurchaseLine>,
        note: Option<String>,
    ) -> Result<Purchase, ProcurementError> {
        if lines.is_empty() {
            return Err(ProcurementError::EmptyPurchase);
        }
        for line in &lines {
            let reason = if line.quantity == 0 {
                Some("quantity must be positive")
            } else if line.conversion < 1 {
                Some("conversion must be at least 1")
            } else if line.unit_cost < 0 {
                Some("unit cost must not be negative")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ProcurementError::InvalidLine {
                    product_id: line.product_id.clone(),
                    reason: reason.to_string(),
                });
            }
        }
        if self.store.get_supplier(supplier_id)?.is_none() {
            return Err(ProcurementError::SupplierNotFound(supplier_id.to_string()));
        }

        let purchase = Purchase {
            id: new_id(),
            supplier_id: supplier_id.to_string(),
            total_cost: lines.iter().map(PurchaseLine::line_cost).sum(),
            lines,
            note,
            created_at: now_millis(),
        };

        let txn = self.store.begin_write()?;
        for line in &purchase.lines {
            let added = line.base_quantity();
            let buy_price = line.unit_cost / line.conversion;
            self.store.update_product_in(&txn, &line.product_id, |p| {
                p.stock += added;
                p.buy_price = buy_price;
            })?;
        }
        self.store.store_purchase(&txn, &purchase)?;
        txn.commit().map_err(StoreError::from)?;

        info!(
            purchase_id = %purchase.id,
            total_cost = purchase.total_cost,
            "Purchase received"
        );
        audit_log!(
            "owner",
            "receive_purchase",
            format!("purchase:{}", short_id(&purchase.id)),
            format!("supplier={} total={}", supplier_id, purchase.total_cost)
        );

        Ok(purchase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Product, ProductUnit, Supplier};

    fn seeded() -> (Store, Supplier) {
        let store = Store::open_in_memory().unwrap();
        store
            .save_product(Product {
                id: "p-aqua".to_string(),
                name: "Aqua 600ml".to_string(),
                barcode: None,
                category: None,
                base_unit: "btl".to_string(),
                price: 3000,
                buy_price: 2000,
                stock: 5,
                units: vec![ProductUnit {
                    name: "Dus".to_string(),
                    price: 60_000,
                    conversion: 24,
                }],
                created_at: 0,
                updated_at: 0,
            })
            .unwrap();
        let supplier = store
            .save_supplier(Supplier {
                id: String::new(),
                name: "CV Tirta".to_string(),
                phone: None,
                address: None,
                created_at: 0,
            })
            .unwrap();
        (store, supplier)
    }

    fn line(product_id: &str, quantity: u32, conversion: i64, unit_cost: i64) -> PurchaseLine {
        PurchaseLine {
            product_id: product_id.to_string(),
            unit_name: "Dus".to_string(),
            quantity,
            conversion,
            unit_cost,
        }
    }

    #[test]
    fn test_receive_updates_stock_and_cost() {
        let (store, supplier) = seeded();
        let service = ProcurementService::new(store.clone());

        let purchase = service
            .receive_purchase(&supplier.id, vec![line("p-aqua", 2, 24, 45_000)], None)
            .unwrap();

        assert_eq!(purchase.total_cost, 90_000);
        let product = store.get_product("p-aqua").unwrap().unwrap();
        assert_eq!(product.stock, 5 + 48);
        assert_eq!(product.buy_price, 1875);
        assert_eq!(store.get_purchases().unwrap(), vec![purchase]);
    }

    #[test]
    fn test_buy_price_uses_integer_division() {
        let (store, supplier) = seeded();
        let service = ProcurementService::new(store.clone());
        service
            .receive_purchase(&supplier.id, vec![line("p-aqua", 1, 24, 50_000)], None)
            .unwrap();
        // 50000 / 24 = 2083.33
        assert_eq!(store.get_product("p-aqua").unwrap().unwrap().buy_price, 2083);
    }

    #[test]
    fn test_unknown_supplier() {
        let (store, _) = seeded();
        let service = ProcurementService::new(store);
        let err = service
            .receive_purchase("s-missing", vec![line("p-aqua", 1, 24, 1000)], None)
            .unwrap_err();
        assert!(matches!(err, ProcurementError::SupplierNotFound(_)));
    }

    #[test]
    fn test_unknown_product_rolls_back() {
        let (store, supplier) = seeded();
        let service = ProcurementService::new(store.clone());

        let err = service
            .receive_purchase(
                &supplier.id,
                vec![line("p-aqua", 1, 24, 45_000), line("p-ghost", 1, 1, 1000)],
                None,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ProcurementError::Store(StoreError::ProductNotFound(_))
        ));
        assert_eq!(store.get_product("p-aqua").unwrap().unwrap().stock, 5);
        assert!(store.get_purchases().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_lines_rejected() {
        let (store, supplier) = seeded();
        let service = ProcurementService::new(store);

        assert!(matches!(
            service.receive_purchase(&supplier.id, vec![], None),
            Err(ProcurementError::EmptyPurchase)
        ));
        assert!(matches!(
            service.receive_purchase(&supplier.id, vec![line("p-aqua", 0, 24, 1000)], None),
            Err(ProcurementError::InvalidLine { .. })
        ));
        assert!(matches!(
            service.receive_purchase(&supplier.id, vec![line("p-aqua", 1, 0, 1000)], None),
            Err(ProcurementError::InvalidLine { .. })
        ));
    }
}
