//! redb-backed persistence for catalog, ledger and settings
//!
//! Every record is stored as JSON under its id. Multi-record changes
//! (checkout, purchase receipt, debt payment) go through a single
//! [`WriteTransaction`] so they commit or abort together.

mod catalog;
mod ledger;
mod settings;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::SettingsError;
use shared::{AppError, ErrorCode};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

type JsonTable = TableDefinition<'static, &'static str, &'static [u8]>;

/// Append-order index: key = sequence, value = record id
type SeqIndex = TableDefinition<'static, u64, &'static str>;

/// Products table: key = product_id, value = JSON
const PRODUCTS_TABLE: JsonTable = TableDefinition::new("products");

/// Customers table: key = customer_id, value = JSON
const CUSTOMERS_TABLE: JsonTable = TableDefinition::new("customers");

/// Suppliers table: key = supplier_id, value = JSON
const SUPPLIERS_TABLE: JsonTable = TableDefinition::new("suppliers");

/// Transactions table: key = transaction_id, value = JSON
const TRANSACTIONS_TABLE: JsonTable = TableDefinition::new("transactions");

/// Index: sequence -> transaction_id
const TRANSACTIONS_BY_SEQ_TABLE: SeqIndex = TableDefinition::new("transactions_by_seq");

/// Purchases table: key = purchase_id, value = JSON
const PURCHASES_TABLE: JsonTable = TableDefinition::new("purchases");

/// Index: sequence -> purchase_id
const PURCHASES_BY_SEQ_TABLE: SeqIndex = TableDefinition::new("purchases_by_seq");

/// Debt entries table: key = entry_id, value = JSON
const DEBT_ENTRIES_TABLE: JsonTable = TableDefinition::new("debt_entries");

/// Index: (customer_id, sequence) -> entry_id
const DEBT_BY_CUSTOMER_TABLE: TableDefinition<(&str, u64), &str> =
    TableDefinition::new("debt_entries_by_customer");

/// Sequence counters, one key per append-only ledger
const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

/// Singleton values: app settings and PIN hashes
const SETTINGS_TABLE: JsonTable = TableDefinition::new("settings");

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] SettingsError),

    #[error("Invalid record: {0}")]
    Invalid(String),

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Supplier not found: {0}")]
    SupplierNotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ProductNotFound(id) => {
                AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", id)
            }
            StoreError::CustomerNotFound(id) => {
                AppError::new(ErrorCode::CustomerNotFound).with_detail("customer_id", id)
            }
            StoreError::SupplierNotFound(id) => {
                AppError::new(ErrorCode::SupplierNotFound).with_detail("supplier_id", id)
            }
            StoreError::InvalidSettings(e) => AppError::validation(e.to_string()),
            StoreError::Invalid(msg) => AppError::validation(msg),
            other => AppError::database(other.to_string()),
        }
    }
}

/// Embedded POS database
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl Store {
    /// Open or create database
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// Open in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db =
            Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StoreResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PRODUCTS_TABLE)?;
            let _ = write_txn.open_table(CUSTOMERS_TABLE)?;
            let _ = write_txn.open_table(SUPPLIERS_TABLE)?;
            let _ = write_txn.open_table(TRANSACTIONS_TABLE)?;
            let _ = write_txn.open_table(TRANSACTIONS_BY_SEQ_TABLE)?;
            let _ = write_txn.open_table(PURCHASES_TABLE)?;
            let _ = write_txn.open_table(PURCHASES_BY_SEQ_TABLE)?;
            let _ = write_txn.open_table(DEBT_ENTRIES_TABLE)?;
            let _ = write_txn.open_table(DEBT_BY_CUSTOMER_TABLE)?;
            let _ = write_txn.open_table(SEQUENCE_TABLE)?;
            let _ = write_txn.open_table(SETTINGS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    pub fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== JSON helpers ==========

    fn read_one<T: DeserializeOwned>(&self, table: JsonTable, id: &str) -> StoreResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;

        match table.get(id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    fn read_all<T: DeserializeOwned>(&self, table: JsonTable) -> StoreResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(table)?;

        let mut records = Vec::new();
        for result in table.iter()? {
            let (_, guard) = result?;
            records.push(serde_json::from_slice(guard.value())?);
        }
        Ok(records)
    }

    /// Upsert in its own write transaction
    fn write_one<T: Serialize>(&self, table: JsonTable, id: &str, value: &T) -> StoreResult<()> {
        let txn = self.begin_write()?;
        write_json(&txn, table, id, value)?;
        txn.commit()?;
        Ok(())
    }

    /// Remove in its own write transaction; returns whether the key existed
    fn remove_one(&self, table: JsonTable, id: &str) -> StoreResult<bool> {
        let txn = self.begin_write()?;
        let existed = {
            let mut table = txn.open_table(table)?;
            table.remove(id)?.is_some()
        };
        txn.commit()?;
        Ok(existed)
    }
}

fn write_json<T: Serialize>(
    txn: &WriteTransaction,
    table: JsonTable,
    id: &str,
    value: &T,
) -> StoreResult<()> {
    let mut table = txn.open_table(table)?;
    let bytes = serde_json::to_vec(value)?;
    table.insert(id, bytes.as_slice())?;
    Ok(())
}

fn read_json_in<T: DeserializeOwned>(
    txn: &WriteTransaction,
    table: JsonTable,
    id: &str,
) -> StoreResult<Option<T>> {
    let table = txn.open_table(table)?;
    // Copy out before the table handle is dropped
    let bytes = match table.get(id)? {
        Some(guard) => guard.value().to_vec(),
        None => return Ok(None),
    };
    Ok(Some(serde_json::from_slice(&bytes)?))
}
