//! Audit event storage - byte-level API for the hub audit log.

use anyhow::Result;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;

const AUDIT_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("audit_events");

/// Low-level audit storage with byte-level API
#[derive(Debug, Clone)]
pub struct AuditStorage {
    db: Arc<Database>,
}

impl AuditStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(AUDIT_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Store a raw audit entry by ID
    pub fn put_raw(&self, id: &str, data: &[u8]) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(AUDIT_TABLE)?;
            table.insert(id, data)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// List all raw audit entries
    pub fn list_raw(&self) -> Result<Vec<(String, Vec<u8>)>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(AUDIT_TABLE)?;

        let mut entries = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            entries.push((key.value().to_string(), value.value().to_vec()));
        }

        Ok(entries)
    }
}
