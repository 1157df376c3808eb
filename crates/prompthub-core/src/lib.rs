//! PromptHub core - catalog models, hub HTTP service, client gateway, and
//! the import pipeline.

pub mod client;
pub mod error;
pub mod events;
pub mod hub;
pub mod importer;
pub mod models;
pub mod seed;
pub mod storage;

pub use error::HubError;
pub use models::*;

use prompthub_storage::{SettingsStorage, Storage};
use std::sync::Arc;
use storage::{AuditLog, ItemStore, VoteStore};
use tracing::info;

/// Core hub state shared by the HTTP service and embedding hosts.
pub struct HubCore {
    pub storage: Arc<Storage>,
    pub items: ItemStore,
    pub votes: VoteStore,
    pub audit: AuditLog,
}

impl HubCore {
    pub fn new(db_path: &str) -> anyhow::Result<Self> {
        let storage = Arc::new(Storage::new(db_path)?);

        let core = Self {
            items: ItemStore::new(storage.items.clone()),
            votes: VoteStore::new(storage.votes.clone()),
            audit: AuditLog::new(storage.audit.clone()),
            storage,
        };

        // Insert the starter catalog on first boot
        seed::ensure_seeded(&core)?;

        info!("PromptHub core initialized");
        Ok(core)
    }

    pub fn settings(&self) -> &SettingsStorage {
        &self.storage.settings
    }
}
