//! Typed audit log wrapper.

use crate::error::HubError;
use crate::models::HubEvent;
use prompthub_storage::AuditStorage;

#[derive(Debug, Clone)]
pub struct AuditLog {
    inner: AuditStorage,
}

impl AuditLog {
    pub fn new(inner: AuditStorage) -> Self {
        Self { inner }
    }

    pub fn append(&self, event: &HubEvent) -> Result<(), HubError> {
        let bytes =
            serde_json::to_vec(event).map_err(|e| HubError::Upstream(anyhow::Error::new(e)))?;
        self.inner.put_raw(&event.id, &bytes)?;
        Ok(())
    }

    /// All recorded events, newest first.
    pub fn list(&self) -> Result<Vec<HubEvent>, HubError> {
        let raw = self.inner.list_raw()?;
        let mut events = Vec::with_capacity(raw.len());
        for (_, bytes) in raw {
            let event: HubEvent = serde_json::from_slice(&bytes)
                .map_err(|e| HubError::Upstream(anyhow::Error::new(e)))?;
            events.push(event);
        }
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemType;
    use prompthub_storage::Storage;
    use tempfile::tempdir;

    #[test]
    fn test_append_and_list() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let storage = Storage::new(db_path.to_str().unwrap()).unwrap();
        let log = AuditLog::new(storage.audit.clone());

        log.append(&HubEvent::import(
            ItemType::SlashCommand,
            "resumir",
            Some("user-a"),
        ))
        .unwrap();
        log.append(&HubEvent::publish(ItemType::AgentSkill, "skill", None))
            .unwrap();

        let events = log.list().unwrap();
        assert_eq!(events.len(), 2);
        assert!(events.iter().any(|e| e.event == "hub_import"));
        assert!(events.iter().any(|e| e.event == "hub_publish"));
    }
}
