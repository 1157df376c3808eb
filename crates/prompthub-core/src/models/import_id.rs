//! Portable item references: `prompthub-item:<itemType>:<id>`.

use crate::error::HubError;
use crate::models::ItemType;
use std::fmt;

/// Namespace literal prefixing every import id.
pub const IMPORT_ID_NAMESPACE: &str = "prompthub-item";

/// Parsed portable reference to one hub item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    pub item_type: ItemType,
    pub id: String,
}

impl ImportId {
    pub fn new(item_type: ItemType, id: impl Into<String>) -> Self {
        Self {
            item_type,
            id: id.into(),
        }
    }

    /// Parse an import id, splitting on the first two colons only so ids
    /// containing colons survive the round trip.
    pub fn parse(raw: &str) -> Result<Self, HubError> {
        let mut parts = raw.splitn(3, ':');
        let namespace = parts.next().unwrap_or_default();
        let item_type = parts.next().unwrap_or_default();
        let id = parts.next().unwrap_or_default();

        if namespace != IMPORT_ID_NAMESPACE {
            return Err(HubError::validation(format!("Invalid import id: {raw}")));
        }
        let item_type = item_type
            .parse::<ItemType>()
            .map_err(|_| HubError::validation(format!("Invalid import id: {raw}")))?;
        if id.is_empty() {
            return Err(HubError::validation(format!("Invalid import id: {raw}")));
        }

        Ok(Self::new(item_type, id))
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{IMPORT_ID_NAMESPACE}:{}:{}", self.item_type, self.id)
    }
}
