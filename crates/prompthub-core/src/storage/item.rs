//! Typed item store over the byte-level storage.

use crate::error::HubError;
use crate::models::{ItemDraft, ItemPatch, ItemRecord, ItemType};
use prompthub_storage::{ItemStorage, time_utils};

/// Typed wrapper around `prompthub_storage::ItemStorage`.
#[derive(Debug, Clone)]
pub struct ItemStore {
    inner: ItemStorage,
}

impl ItemStore {
    pub fn new(inner: ItemStorage) -> Self {
        Self { inner }
    }

    /// List every item of one type, newest-created-first.
    pub fn list(&self, item_type: ItemType) -> Result<Vec<ItemRecord>, HubError> {
        let raw = self.inner.list_type_raw(item_type.as_str())?;
        let mut records = Vec::with_capacity(raw.len());
        for (_, bytes) in raw {
            let record: ItemRecord = serde_json::from_slice(&bytes)
                .map_err(|e| HubError::Upstream(anyhow::Error::new(e)))?;
            records.push(record);
        }

        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(records)
    }

    pub fn get(&self, item_type: ItemType, id: &str) -> Result<Option<ItemRecord>, HubError> {
        let key = ItemStorage::item_key(item_type.as_str(), id);
        if let Some(bytes) = self.inner.get_raw(&key)? {
            let record = serde_json::from_slice(&bytes)
                .map_err(|e| HubError::Upstream(anyhow::Error::new(e)))?;
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    /// Create an item, applying defaults and normalization.
    pub fn create(&self, item_type: ItemType, draft: ItemDraft) -> Result<ItemRecord, HubError> {
        let record = draft.into_record(item_type, time_utils::now_ms())?;
        let key = record.storage_key();
        if self.inner.exists(&key)? {
            return Err(HubError::validation(format!(
                "Item {} already exists",
                record.id
            )));
        }
        self.put(&record)?;
        Ok(record)
    }

    /// Merge a partial update into a stored item. Returns `None` on miss.
    pub fn update(
        &self,
        item_type: ItemType,
        id: &str,
        patch: ItemPatch,
    ) -> Result<Option<ItemRecord>, HubError> {
        let Some(mut record) = self.get(item_type, id)? else {
            return Ok(None);
        };
        record.apply_patch(patch, time_utils::now_ms())?;
        self.put(&record)?;
        Ok(Some(record))
    }

    /// Delete an item, true if a row was removed. Missing items are not an
    /// error.
    pub fn delete(&self, item_type: ItemType, id: &str) -> Result<bool, HubError> {
        let key = ItemStorage::item_key(item_type.as_str(), id);
        Ok(self.inner.delete(&key)?)
    }

    fn put(&self, record: &ItemRecord) -> Result<(), HubError> {
        let bytes = serde_json::to_vec(record)
            .map_err(|e| HubError::Upstream(anyhow::Error::new(e)))?;
        self.inner.put_raw(&record.storage_key(), &bytes)?;
        Ok(())
    }
}
