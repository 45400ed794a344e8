//! Append-only records: transactions, purchases and debt entries
//!
//! Each ledger keeps a sequence index assigned inside the write
//! transaction, so listings follow commit order rather than timestamps.

use redb::{ReadableDatabase, ReadableTable, WriteTransaction};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{DebtEntry, Purchase, Transaction};

use super::{
    DEBT_BY_CUSTOMER_TABLE, DEBT_ENTRIES_TABLE, JsonTable, PURCHASES_BY_SEQ_TABLE,
    PURCHASES_TABLE, SEQUENCE_TABLE, SeqIndex, Store, StoreResult, TRANSACTIONS_BY_SEQ_TABLE,
    TRANSACTIONS_TABLE, write_json,
};

const TRANSACTIONS_SEQ_KEY: &str = "transactions";
const PURCHASES_SEQ_KEY: &str = "purchases";
const DEBT_ENTRIES_SEQ_KEY: &str = "debt_entries";

/// Increment and return the counter under `key` (first value is 1)
fn increment_sequence(txn: &WriteTransaction, key: &str) -> StoreResult<u64> {
    let mut table = txn.open_table(SEQUENCE_TABLE)?;
    let current = table.get(key)?.map(|guard| guard.value()).unwrap_or(0);
    let next = current + 1;
    table.insert(key, next)?;
    Ok(next)
}

fn append_indexed<T: Serialize>(
    txn: &WriteTransaction,
    table: JsonTable,
    index: SeqIndex,
    seq_key: &str,
    id: &str,
    value: &T,
) -> StoreResult<()> {
    write_json(txn, table, id, value)?;
    let seq = increment_sequence(txn, seq_key)?;
    let mut index = txn.open_table(index)?;
    index.insert(seq, id)?;
    Ok(())
}

/// Entries indexed under `customer_id`, newest first
fn customer_entries(
    by_customer: &impl ReadableTable<(&'static str, u64), &'static str>,
    data: &impl ReadableTable<&'static str, &'static [u8]>,
    customer_id: &str,
) -> StoreResult<Vec<DebtEntry>> {
    let mut entries = Vec::new();
    for result in by_customer
        .range((customer_id, 0u64)..=(customer_id, u64::MAX))?
        .rev()
    {
        let (_, entry_id) = result?;
        if let Some(guard) = data.get(entry_id.value())? {
            entries.push(serde_json::from_slice(guard.value())?);
        }
    }
    Ok(entries)
}

impl Store {
    /// Records of an indexed ledger, newest first, at most `limit`
    fn read_newest_first<T: DeserializeOwned>(
        &self,
        table: JsonTable,
        index: SeqIndex,
        limit: Option<usize>,
    ) -> StoreResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(index)?;
        let data = read_txn.open_table(table)?;

        let mut records = Vec::new();
        for result in index.iter()?.rev() {
            if limit.is_some_and(|n| records.len() >= n) {
                break;
            }
            let (_, id) = result?;
            if let Some(guard) = data.get(id.value())? {
                records.push(serde_json::from_slice(guard.value())?);
            }
        }
        Ok(records)
    }

    // ========== Transactions ==========

    pub fn append_transaction(&self, txn: &WriteTransaction, tx: &Transaction) -> StoreResult<()> {
        append_indexed(
            txn,
            TRANSACTIONS_TABLE,
            TRANSACTIONS_BY_SEQ_TABLE,
            TRANSACTIONS_SEQ_KEY,
            &tx.id,
            tx,
        )
    }

    /// All transactions, most recently committed first
    pub fn get_transactions(&self) -> StoreResult<Vec<Transaction>> {
        self.read_newest_first(TRANSACTIONS_TABLE, TRANSACTIONS_BY_SEQ_TABLE, None)
    }

    pub fn get_transaction(&self, id: &str) -> StoreResult<Option<Transaction>> {
        self.read_one(TRANSACTIONS_TABLE, id)
    }

    pub fn latest_transaction(&self) -> StoreResult<Option<Transaction>> {
        Ok(self
            .read_newest_first(TRANSACTIONS_TABLE, TRANSACTIONS_BY_SEQ_TABLE, Some(1))?
            .into_iter()
            .next())
    }

    // ========== Purchases ==========

    pub fn store_purchase(&self, txn: &WriteTransaction, purchase: &Purchase) -> StoreResult<()> {
        append_indexed(
            txn,
            PURCHASES_TABLE,
            PURCHASES_BY_SEQ_TABLE,
            PURCHASES_SEQ_KEY,
            &purchase.id,
            purchase,
        )
    }

    /// All purchases, most recently received first
    pub fn get_purchases(&self) -> StoreResult<Vec<Purchase>> {
        self.read_newest_first(PURCHASES_TABLE, PURCHASES_BY_SEQ_TABLE, None)
    }

    // ========== Debt entries ==========

    /// Store a debt entry and index it under its customer
    pub fn store_debt_entry(&self, txn: &WriteTransaction, entry: &DebtEntry) -> StoreResult<()> {
        write_json(txn, DEBT_ENTRIES_TABLE, &entry.id, entry)?;

        let seq = increment_sequence(txn, DEBT_ENTRIES_SEQ_KEY)?;
        let mut idx_table = txn.open_table(DEBT_BY_CUSTOMER_TABLE)?;
        idx_table.insert((entry.customer_id.as_str(), seq), entry.id.as_str())?;

        Ok(())
    }

    /// Debt entries for one customer, newest first
    pub fn get_debt_entries(&self, customer_id: &str) -> StoreResult<Vec<DebtEntry>> {
        let read_txn = self.db.begin_read()?;
        let idx_table = read_txn.open_table(DEBT_BY_CUSTOMER_TABLE)?;
        let data_table = read_txn.open_table(DEBT_ENTRIES_TABLE)?;
        customer_entries(&idx_table, &data_table, customer_id)
    }

    /// Debt entries for one customer as seen by `txn`, newest first
    ///
    /// Reading through the write transaction keeps a balance check and the
    /// entry that depends on it in one serialized unit.
    pub fn debt_entries_in(
        &self,
        txn: &WriteTransaction,
        customer_id: &str,
    ) -> StoreResult<Vec<DebtEntry>> {
        let idx_table = txn.open_table(DEBT_BY_CUSTOMER_TABLE)?;
        let data_table = txn.open_table(DEBT_ENTRIES_TABLE)?;
        customer_entries(&idx_table, &data_table, customer_id)
    }

    /// Every debt entry in the book (unordered)
    pub fn get_all_debt_entries(&self) -> StoreResult<Vec<DebtEntry>> {
        self.read_all(DEBT_ENTRIES_TABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{DebtEntryKind, PaymentMethod};

    fn transaction(id: &str, timestamp: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            timestamp,
            items: vec![],
            subtotal: Decimal::from(9000),
            discount_amount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total_amount: Decimal::from(9000),
            payment_method: PaymentMethod::Cash,
            cash_paid: Decimal::from(10_000),
            change: Decimal::from(1000),
            customer: None,
            debt_amount: Decimal::ZERO,
        }
    }

    fn entry(id: &str, customer_id: &str, created_at: i64) -> DebtEntry {
        DebtEntry {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            kind: DebtEntryKind::Charge,
            amount: Decimal::from(5000),
            transaction_id: None,
            note: None,
            created_at,
        }
    }

    #[test]
    fn test_transactions_newest_first() {
        let store = Store::open_in_memory().unwrap();

        let txn = store.begin_write().unwrap();
        store.append_transaction(&txn, &transaction("a", 100)).unwrap();
        store.append_transaction(&txn, &transaction("b", 300)).unwrap();
        txn.commit().unwrap();
        let txn = store.begin_write().unwrap();
        store.append_transaction(&txn, &transaction("c", 200)).unwrap();
        txn.commit().unwrap();

        let ids: Vec<String> = store
            .get_transactions()
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(store.latest_transaction().unwrap().unwrap().id, "c");
        assert!(store.get_transaction("b").unwrap().is_some());
    }

    #[test]
    fn test_same_timestamp_keeps_commit_order() {
        let store = Store::open_in_memory().unwrap();

        // ids sort opposite to commit order
        let ids: Vec<String> = (0..20).map(|i| format!("tx-{:02}", 19 - i)).collect();
        for id in &ids {
            let txn = store.begin_write().unwrap();
            store.append_transaction(&txn, &transaction(id, 1_000)).unwrap();
            txn.commit().unwrap();
        }

        let listed: Vec<String> = store
            .get_transactions()
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        let expected: Vec<String> = ids.iter().rev().cloned().collect();
        assert_eq!(listed, expected);
        assert_eq!(store.latest_transaction().unwrap().unwrap().id, "tx-00");
    }

    #[test]
    fn test_aborted_append_does_not_consume_sequence() {
        let store = Store::open_in_memory().unwrap();

        let txn = store.begin_write().unwrap();
        store.append_transaction(&txn, &transaction("a", 1)).unwrap();
        txn.commit().unwrap();
        {
            let txn = store.begin_write().unwrap();
            store.append_transaction(&txn, &transaction("dropped", 1)).unwrap();
        }
        let txn = store.begin_write().unwrap();
        store.append_transaction(&txn, &transaction("b", 1)).unwrap();
        txn.commit().unwrap();

        let ids: Vec<String> = store
            .get_transactions()
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_debt_entries_per_customer() {
        let store = Store::open_in_memory().unwrap();

        let txn = store.begin_write().unwrap();
        store.store_debt_entry(&txn, &entry("e1", "cust-a", 100)).unwrap();
        store.store_debt_entry(&txn, &entry("e2", "cust-b", 150)).unwrap();
        store.store_debt_entry(&txn, &entry("e3", "cust-a", 200)).unwrap();
        txn.commit().unwrap();

        let ids: Vec<String> = store
            .get_debt_entries("cust-a")
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["e3", "e1"]);
        assert_eq!(store.get_all_debt_entries().unwrap().len(), 3);
        assert!(store.get_debt_entries("cust-x").unwrap().is_empty());
    }

    #[test]
    fn test_debt_entries_visible_inside_write_transaction() {
        let store = Store::open_in_memory().unwrap();

        let txn = store.begin_write().unwrap();
        store.store_debt_entry(&txn, &entry("e1", "cust-a", 100)).unwrap();
        let pending = store.debt_entries_in(&txn, "cust-a").unwrap();
        assert_eq!(pending.len(), 1);
        drop(txn);

        assert!(store.get_debt_entries("cust-a").unwrap().is_empty());
    }
}
