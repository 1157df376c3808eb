//! Hub settings storage - connection key and seed marker.

use anyhow::Result;
use redb::{Database, ReadableDatabase, TableDefinition};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const SETTINGS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("hub_settings");

const HUB_SETTINGS_KEY: &str = "hub";
const SEED_VERSION_KEY: &str = "seed_version";

/// Hub connection settings persisted on the host.
///
/// The connection key is loaded when the settings panel mounts, replaced by
/// an explicit save, and removed by an explicit disconnect. There is no
/// expiry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSettings {
    pub connection_key: Option<String>,
}

/// Settings storage
#[derive(Debug, Clone)]
pub struct SettingsStorage {
    db: Arc<Database>,
}

impl SettingsStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(SETTINGS_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Get hub settings, defaults when never saved
    pub fn hub_settings(&self) -> Result<HubSettings> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTINGS_TABLE)?;

        if let Some(data) = table.get(HUB_SETTINGS_KEY)? {
            Ok(serde_json::from_slice(data.value())?)
        } else {
            Ok(HubSettings::default())
        }
    }

    /// Replace hub settings
    pub fn update_hub_settings(&self, settings: &HubSettings) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SETTINGS_TABLE)?;
            let serialized = serde_json::to_vec(settings)?;
            table.insert(HUB_SETTINGS_KEY, serialized.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Drop the stored connection key
    pub fn clear_connection_key(&self) -> Result<()> {
        let mut settings = self.hub_settings()?;
        settings.connection_key = None;
        self.update_hub_settings(&settings)
    }

    /// Version of the starter catalog already applied, 0 when never seeded
    pub fn seed_version(&self) -> Result<u32> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SETTINGS_TABLE)?;

        if let Some(data) = table.get(SEED_VERSION_KEY)? {
            Ok(serde_json::from_slice(data.value())?)
        } else {
            Ok(0)
        }
    }

    /// Record the applied starter catalog version
    pub fn set_seed_version(&self, version: u32) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(SETTINGS_TABLE)?;
            let serialized = serde_json::to_vec(&version)?;
            table.insert(SEED_VERSION_KEY, serialized.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup() -> (SettingsStorage, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = Arc::new(Database::create(db_path).unwrap());
        let storage = SettingsStorage::new(db).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_defaults_when_never_saved() {
        let (storage, _temp_dir) = setup();

        let settings = storage.hub_settings().unwrap();
        assert!(settings.connection_key.is_none());
        assert_eq!(storage.seed_version().unwrap(), 0);
    }

    #[test]
    fn test_save_and_clear_connection_key() {
        let (storage, _temp_dir) = setup();

        storage
            .update_hub_settings(&HubSettings {
                connection_key: Some("hub-key-123".to_string()),
            })
            .unwrap();
        assert_eq!(
            storage.hub_settings().unwrap().connection_key.as_deref(),
            Some("hub-key-123")
        );

        storage.clear_connection_key().unwrap();
        assert!(storage.hub_settings().unwrap().connection_key.is_none());
    }

    #[test]
    fn test_seed_version_roundtrip() {
        let (storage, _temp_dir) = setup();

        storage.set_seed_version(1).unwrap();
        assert_eq!(storage.seed_version().unwrap(), 1);

        storage.set_seed_version(2).unwrap();
        assert_eq!(storage.seed_version().unwrap(), 2);
    }
}
