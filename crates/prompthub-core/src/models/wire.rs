//! Wire shapes shared by the hub service and the client gateway.
//!
//! Success bodies always carry `error: null`; failures are rendered by the
//! hub's error type as `{"success": false, "error": "<message>"}`. Clients
//! rely on this envelope staying exactly as is.

use crate::models::{ItemRecord, ItemType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Wire-level item: the stored record plus fields derived at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubItem {
    #[serde(flatten)]
    pub record: ItemRecord,
    pub rating: i64,
    pub rating_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_vote: Option<i8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_id: Option<String>,
}

/// One item-type bucket of the explore listing. `has_more` is always false;
/// the hub returns full sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExploreGroup {
    pub items: Vec<HubItem>,
    pub has_more: bool,
    pub total_count: u64,
}

/// Explore response: items grouped by plural type key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExploreResponse {
    #[serde(flatten)]
    pub groups: BTreeMap<String, ExploreGroup>,
    pub error: Option<String>,
}

/// Pull response for a single item. `url` carries the bundle download URL
/// for bundle items, null otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<HubItem>,
    pub url: Option<String>,
    pub error: Option<String>,
}

/// Create/update response carrying the stored item with parsed tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub item: HubItem,
    pub error: Option<String>,
}

/// Delete acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub error: Option<String>,
}

/// Identity attached to a validated connection key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubUser {
    pub id: String,
    pub name: String,
}

/// Connection-key validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequest {
    pub connection_key: String,
}

/// Connection-key validation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<HubUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The caller's own items. Degrades to the empty shape when the request
/// carries no usable bearer token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserItemsResponse {
    pub created_by_me: BTreeMap<String, ExploreGroup>,
    pub team_items: Vec<HubItem>,
    pub error: Option<String>,
}

/// Vote cast request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub vote: i8,
}

/// Vote cast result with recomputed aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub success: bool,
    pub rating: i64,
    pub rating_count: u64,
    pub user_vote: i8,
    pub error: Option<String>,
}

/// Vote query result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserVoteResponse {
    pub success: bool,
    pub user_vote: i8,
    pub error: Option<String>,
}

/// Aggregate vote state of one item for one requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSummary {
    pub rating: i64,
    pub rating_count: u64,
    pub user_vote: i8,
}

/// Audit log entry for hub imports and publishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubEvent {
    pub id: String,
    pub event: String,
    pub item_id: String,
    pub item_type: ItemType,
    #[serde(default)]
    pub user: Option<String>,
    pub timestamp: i64,
}

impl HubEvent {
    fn new(event: &str, item_type: ItemType, item_id: &str, user: Option<&str>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event: event.to_string(),
            item_id: item_id.to_string(),
            item_type,
            user: user.map(str::to_string),
            timestamp: prompthub_storage::time_utils::now_ms(),
        }
    }

    pub fn import(item_type: ItemType, item_id: &str, user: Option<&str>) -> Self {
        Self::new("hub_import", item_type, item_id, user)
    }

    pub fn publish(item_type: ItemType, item_id: &str, user: Option<&str>) -> Self {
        Self::new("hub_publish", item_type, item_id, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemDraft, Visibility};

    fn sample_item() -> HubItem {
        let record = ItemDraft {
            name: Some("Resumir".to_string()),
            command: Some("/resumir".to_string()),
            prompt: Some("Summarize...".to_string()),
            ..ItemDraft::default()
        }
        .into_record(ItemType::SlashCommand, 100)
        .unwrap();
        HubItem {
            import_id: Some(record.import_id()),
            record,
            rating: 3,
            rating_count: 5,
            user_vote: Some(1),
        }
    }

    #[test]
    fn test_hub_item_wire_shape() {
        let value = serde_json::to_value(sample_item()).unwrap();
        assert_eq!(value["itemType"], "slash-command");
        assert_eq!(value["command"], "/resumir");
        assert_eq!(value["rating"], 3);
        assert_eq!(value["ratingCount"], 5);
        assert_eq!(value["userVote"], 1);
        assert_eq!(value["importId"], "prompthub-item:slash-command:resumir");
        assert_eq!(value["visibility"], "public");
    }

    #[test]
    fn test_explore_response_flattens_groups() {
        let mut response = ExploreResponse::default();
        response.groups.insert(
            "slashcommands".to_string(),
            ExploreGroup {
                items: vec![sample_item()],
                has_more: false,
                total_count: 1,
            },
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["slashcommands"]["totalCount"], 1);
        assert_eq!(value["slashcommands"]["hasMore"], false);
        assert!(value["error"].is_null());

        let back: ExploreResponse = serde_json::from_value(value).unwrap();
        assert_eq!(back.groups.len(), 1);
        assert!(back.error.is_none());
    }

    #[test]
    fn test_hub_item_roundtrip() {
        let item = sample_item();
        let encoded = serde_json::to_string(&item).unwrap();
        let back: HubItem = serde_json::from_str(&encoded).unwrap();
        assert_eq!(back.record, item.record);
        assert_eq!(back.rating, item.rating);
        assert_eq!(back.user_vote, item.user_vote);
        assert_eq!(back.import_id, item.import_id);
    }

    #[test]
    fn test_visibility_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Visibility::Private).unwrap(),
            serde_json::json!("private")
        );
    }
}
