//! Item storage - byte-level API for catalog item records.
//!
//! Records are keyed `<itemType>:<id>` so one table serves every item type;
//! listings by type are prefix scans. Item types never contain `:` so the
//! prefix is unambiguous even when ids do.

use anyhow::Result;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::sync::Arc;

const ITEMS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("items");

/// Low-level item storage with byte-level API
#[derive(Debug, Clone)]
pub struct ItemStorage {
    db: Arc<Database>,
}

impl ItemStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(ITEMS_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Composite storage key for an item.
    pub fn item_key(item_type: &str, id: &str) -> String {
        format!("{item_type}:{id}")
    }

    /// Store raw record data under its composite key
    pub fn put_raw(&self, key: &str, data: &[u8]) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(ITEMS_TABLE)?;
            table.insert(key, data)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get raw record data by composite key
    pub fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ITEMS_TABLE)?;

        if let Some(data) = table.get(key)? {
            Ok(Some(data.value().to_vec()))
        } else {
            Ok(None)
        }
    }

    /// List all raw records of one item type
    pub fn list_type_raw(&self, item_type: &str) -> Result<Vec<(String, Vec<u8>)>> {
        let (start, end) = crate::range_utils::prefix_range(&format!("{item_type}:"));
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ITEMS_TABLE)?;

        let mut records = Vec::new();
        for entry in table.range(start.as_str()..end.as_str())? {
            let (key, value) = entry?;
            records.push((key.value().to_string(), value.value().to_vec()));
        }

        Ok(records)
    }

    /// Check if a record exists
    pub fn exists(&self, key: &str) -> Result<bool> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ITEMS_TABLE)?;
        Ok(table.get(key)?.is_some())
    }

    /// Delete a record, returns true if a row was removed
    pub fn delete(&self, key: &str) -> Result<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(ITEMS_TABLE)?;
            table.remove(key)?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }

    /// Count records across all item types
    pub fn count(&self) -> Result<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ITEMS_TABLE)?;
        Ok(table.len()?)
    }
}
