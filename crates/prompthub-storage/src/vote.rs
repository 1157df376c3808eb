//! Vote ledger - per-(item, user) votes with atomic aggregate recompute.
//!
//! Rows are keyed `(item_key, user)` and hold the vote value; a retracted
//! vote is a removed row, never a stored zero. Aggregates are recomputed
//! from the full vote set of the item inside the same write transaction as
//! the mutation, so concurrent voters cannot produce a lost update.

use anyhow::Result;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;

const VOTES_TABLE: TableDefinition<(&str, &str), i8> = TableDefinition::new("votes");

/// Aggregate state of an item after a vote mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    /// Sum of all stored vote values.
    pub rating: i64,
    /// Number of stored (non-zero) votes.
    pub count: u64,
    /// The requester's vote after the mutation.
    pub user_vote: i8,
}

#[derive(Debug, Clone)]
pub struct VoteStorage {
    db: Arc<Database>,
}

impl VoteStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(VOTES_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Apply a vote with server-side toggle semantics.
    ///
    /// If the requester's prior vote equals `value` the vote is retracted;
    /// otherwise `value` replaces it. An explicit 0 always retracts. The
    /// prior-vote read, the row mutation, and the aggregate recompute all
    /// happen in one write transaction.
    pub fn apply(&self, item_key: &str, user: &str, value: i8) -> Result<VoteTally> {
        let write_txn = self.db.begin_write()?;
        let tally = {
            let mut table = write_txn.open_table(VOTES_TABLE)?;

            let prior = table.get((item_key, user))?.map(|g| g.value()).unwrap_or(0);
            let effective = if prior == value { 0 } else { value };

            if effective == 0 {
                table.remove((item_key, user))?;
            } else {
                table.insert((item_key, user), effective)?;
            }

            let (rating, count) = tally_item(&table, item_key)?;
            VoteTally {
                rating,
                count,
                user_vote: effective,
            }
        };
        write_txn.commit()?;
        Ok(tally)
    }

    /// The requester's stored vote, 0 if they have never voted.
    pub fn user_vote(&self, item_key: &str, user: &str) -> Result<i8> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VOTES_TABLE)?;
        Ok(table.get((item_key, user))?.map(|g| g.value()).unwrap_or(0))
    }

    /// Current (rating, count) aggregates for an item.
    pub fn tally(&self, item_key: &str) -> Result<(i64, u64)> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(VOTES_TABLE)?;
        tally_item(&table, item_key)
    }

    /// Remove every vote row of an item, returns how many were removed.
    pub fn clear_item(&self, item_key: &str) -> Result<u64> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(VOTES_TABLE)?;

            let mut stale = Vec::new();
            for entry in table.range((item_key, "")..)? {
                let (key, _) = entry?;
                let (key_item, key_user) = key.value();
                if key_item != item_key {
                    break;
                }
                stale.push(key_user.to_string());
            }

            for user in &stale {
                table.remove((item_key, user.as_str()))?;
            }
            stale.len() as u64
        };
        write_txn.commit()?;
        Ok(removed)
    }
}

fn tally_item(
    table: &impl ReadableTable<(&'static str, &'static str), i8>,
    item_key: &str,
) -> Result<(i64, u64)> {
    let mut rating = 0i64;
    let mut count = 0u64;
    for entry in table.range((item_key, "")..)? {
        let (key, value) = entry?;
        if key.value().0 != item_key {
            break;
        }
        rating += value.value() as i64;
        count += 1;
    }
    Ok((rating, count))
}
