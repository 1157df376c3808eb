//! PromptHub Storage - persistence layer for the hub catalog
//!
//! This crate provides the persistence layer for the hub, using redb as the
//! embedded database. It exposes byte-level APIs for item records and keeps
//! the vote ledger, hub settings, and audit log in their own tables.
//!
//! # Tables
//!
//! - `items` - catalog item records, keyed `<itemType>:<id>`
//! - `votes` - per-(item, user) vote ledger
//! - `hub_settings` - connection key and seed marker
//! - `audit_events` - import/publish audit entries

pub mod audit;
pub mod item;
pub mod range_utils;
pub mod settings;
pub mod time_utils;
pub mod vote;

use anyhow::Result;
use redb::Database;
use std::sync::Arc;

pub use audit::AuditStorage;
pub use item::ItemStorage;
pub use settings::{HubSettings, SettingsStorage};
pub use vote::{VoteStorage, VoteTally};

/// Central storage manager that initializes all storage subsystems
pub struct Storage {
    db: Arc<Database>,
    pub items: ItemStorage,
    pub votes: VoteStorage,
    pub settings: SettingsStorage,
    pub audit: AuditStorage,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// This will create the database file if it doesn't exist and initialize
    /// all required tables.
    pub fn new(path: &str) -> Result<Self> {
        let db = Arc::new(Database::create(path)?);

        let items = ItemStorage::new(db.clone())?;
        let votes = VoteStorage::new(db.clone())?;
        let settings = SettingsStorage::new(db.clone())?;
        let audit = AuditStorage::new(db.clone())?;

        Ok(Self {
            db,
            items,
            votes,
            settings,
            audit,
        })
    }

    /// Get a reference to the underlying database
    pub fn get_db(&self) -> Arc<Database> {
        self.db.clone()
    }
}
