//! Products, customers and suppliers

use redb::WriteTransaction;
use shared::models::{Customer, Product, Supplier};
use shared::util::{new_id, now_millis};

use super::{
    CUSTOMERS_TABLE, PRODUCTS_TABLE, SUPPLIERS_TABLE, Store, StoreError, StoreResult,
    read_json_in, write_json,
};

impl Store {
    // ========== Products ==========

    pub fn get_products(&self) -> StoreResult<Vec<Product>> {
        let mut products: Vec<Product> = self.read_all(PRODUCTS_TABLE)?;
        products.sort_by_key(|p| p.name.to_lowercase());
        Ok(products)
    }

    pub fn get_product(&self, id: &str) -> StoreResult<Option<Product>> {
        self.read_one(PRODUCTS_TABLE, id)
    }

    /// Find a product by exact barcode
    pub fn find_product_by_barcode(&self, barcode: &str) -> StoreResult<Option<Product>> {
        Ok(self
            .get_products()?
            .into_iter()
            .find(|p| p.barcode.as_deref() == Some(barcode)))
    }

    /// Insert or update a product and return the stored record
    ///
    /// Empty ids get a fresh UUID; `created_at` is kept from the existing
    /// record on update.
    pub fn save_product(&self, mut product: Product) -> StoreResult<Product> {
        if product.name.trim().is_empty() {
            return Err(StoreError::Invalid("product name is required".to_string()));
        }
        if product.price < 0 || product.buy_price < 0 {
            return Err(StoreError::Invalid("prices must not be negative".to_string()));
        }
        if let Some(unit) = product.units.iter().find(|u| u.conversion < 1) {
            return Err(StoreError::Invalid(format!(
                "unit {} must convert to at least one {}",
                unit.name, product.base_unit
            )));
        }

        if product.id.is_empty() {
            product.id = new_id();
        }
        let now = now_millis();
        product.created_at = match self.get_product(&product.id)? {
            Some(existing) => existing.created_at,
            None => now,
        };
        product.updated_at = now;

        self.write_one(PRODUCTS_TABLE, &product.id, &product)?;
        self.get_product(&product.id)?
            .ok_or(StoreError::ProductNotFound(product.id))
    }

    pub fn delete_product(&self, id: &str) -> StoreResult<bool> {
        self.remove_one(PRODUCTS_TABLE, id)
    }

    /// Add `delta` base units to a product's stock inside `txn`
    ///
    /// Stock may go negative; the caller decides whether to warn.
    pub fn adjust_stock(
        &self,
        txn: &WriteTransaction,
        product_id: &str,
        delta: i64,
    ) -> StoreResult<Product> {
        self.update_product_in(txn, product_id, |p| p.stock += delta)
    }

    /// Read-modify-write a product inside `txn`
    pub fn update_product_in(
        &self,
        txn: &WriteTransaction,
        product_id: &str,
        f: impl FnOnce(&mut Product),
    ) -> StoreResult<Product> {
        let mut product: Product = read_json_in(txn, PRODUCTS_TABLE, product_id)?
            .ok_or_else(|| StoreError::ProductNotFound(product_id.to_string()))?;
        f(&mut product);
        product.updated_at = now_millis();
        write_json(txn, PRODUCTS_TABLE, product_id, &product)?;
        Ok(product)
    }

    // ========== Customers ==========

    pub fn get_customers(&self) -> StoreResult<Vec<Customer>> {
        let mut customers: Vec<Customer> = self.read_all(CUSTOMERS_TABLE)?;
        customers.sort_by_key(|c| c.name.to_lowercase());
        Ok(customers)
    }

    pub fn get_customer(&self, id: &str) -> StoreResult<Option<Customer>> {
        self.read_one(CUSTOMERS_TABLE, id)
    }

    pub fn save_customer(&self, mut customer: Customer) -> StoreResult<Customer> {
        if customer.name.trim().is_empty() {
            return Err(StoreError::Invalid("customer name is required".to_string()));
        }
        if customer.id.is_empty() {
            customer.id = new_id();
        }
        if customer.created_at == 0 {
            customer.created_at = now_millis();
        }

        self.write_one(CUSTOMERS_TABLE, &customer.id, &customer)?;
        self.get_customer(&customer.id)?
            .ok_or(StoreError::CustomerNotFound(customer.id))
    }

    pub fn delete_customer(&self, id: &str) -> StoreResult<bool> {
        self.remove_one(CUSTOMERS_TABLE, id)
    }

    // ========== Suppliers ==========

    pub fn get_suppliers(&self) -> StoreResult<Vec<Supplier>> {
        let mut suppliers: Vec<Supplier> = self.read_all(SUPPLIERS_TABLE)?;
        suppliers.sort_by_key(|s| s.name.to_lowercase());
        Ok(suppliers)
    }

    pub fn get_supplier(&self, id: &str) -> StoreResult<Option<Supplier>> {
        self.read_one(SUPPLIERS_TABLE, id)
    }

    pub fn save_supplier(&self, mut supplier: Supplier) -> StoreResult<Supplier> {
        if supplier.name.trim().is_empty() {
            return Err(StoreError::Invalid("supplier name is required".to_string()));
        }
        if supplier.id.is_empty() {
            supplier.id = new_id();
        }
        if supplier.created_at == 0 {
            supplier.created_at = now_millis();
        }

        self.write_one(SUPPLIERS_TABLE, &supplier.id, &supplier)?;
        self.get_supplier(&supplier.id)?
            .ok_or(StoreError::SupplierNotFound(supplier.id))
    }

    pub fn delete_supplier(&self, id: &str) -> StoreResult<bool> {
        self.remove_one(SUPPLIERS_TABLE, id)
    }
}
