//! Catalog item model - the shareable unit of hub content.
//!
//! Each item type carries only the fields that are meaningful for it, as an
//! internally tagged enum, so the wire shape stays flat:
//! `{"itemType": "slash-command", "command": "/x", "prompt": "..."}`.

use crate::error::HubError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Default author attributed to items published without one.
pub const PLATFORM_AUTHOR: &str = "PromptHub";

/// Upper bound on normalized tag count.
pub const MAX_TAGS: usize = 12;
/// Upper bound on a single tag's length in characters.
pub const MAX_TAG_LEN: usize = 48;

/// Closed set of shareable item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    SystemPrompt,
    SlashCommand,
    AgentSkill,
    AgentFlow,
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [
        ItemType::SystemPrompt,
        ItemType::SlashCommand,
        ItemType::AgentSkill,
        ItemType::AgentFlow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::SystemPrompt => "system-prompt",
            ItemType::SlashCommand => "slash-command",
            ItemType::AgentSkill => "agent-skill",
            ItemType::AgentFlow => "agent-flow",
        }
    }

    /// Grouping key used by the explore endpoint.
    pub fn plural_key(self) -> &'static str {
        match self {
            ItemType::SystemPrompt => "systemprompts",
            ItemType::SlashCommand => "slashcommands",
            ItemType::AgentSkill => "agentskills",
            ItemType::AgentFlow => "agentflows",
        }
    }

    /// Bundle kinds are installed from a downloaded archive; text kinds
    /// apply directly.
    pub fn is_bundle(self) -> bool {
        matches!(self, ItemType::AgentSkill | ItemType::AgentFlow)
    }
}

impl FromStr for ItemType {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "system-prompt" => Ok(ItemType::SystemPrompt),
            "slash-command" => Ok(ItemType::SlashCommand),
            "agent-skill" => Ok(ItemType::AgentSkill),
            "agent-flow" => Ok(ItemType::AgentFlow),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item visibility. Private items are only readable by their owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Type-specific item content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "itemType", rename_all = "kebab-case")]
pub enum ItemPayload {
    SystemPrompt {
        #[serde(default)]
        prompt: String,
    },
    SlashCommand {
        command: String,
        #[serde(default)]
        prompt: String,
    },
    AgentSkill {
        #[serde(default = "empty_config")]
        config: Value,
    },
    AgentFlow {
        #[serde(default = "empty_config")]
        config: Value,
    },
}

fn empty_config() -> Value {
    Value::Object(serde_json::Map::new())
}

impl ItemPayload {
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemPayload::SystemPrompt { .. } => ItemType::SystemPrompt,
            ItemPayload::SlashCommand { .. } => ItemType::SlashCommand,
            ItemPayload::AgentSkill { .. } => ItemType::AgentSkill,
            ItemPayload::AgentFlow { .. } => ItemType::AgentFlow,
        }
    }

    /// Build a typed payload from the loose wire fields of a create request.
    pub fn from_parts(
        item_type: ItemType,
        prompt: Option<String>,
        command: Option<String>,
        config: Option<Value>,
    ) -> Result<Self, HubError> {
        match item_type {
            ItemType::SystemPrompt => Ok(ItemPayload::SystemPrompt {
                prompt: prompt.unwrap_or_default(),
            }),
            ItemType::SlashCommand => Ok(ItemPayload::SlashCommand {
                command: validate_command(command)?,
                prompt: prompt.unwrap_or_default(),
            }),
            ItemType::AgentSkill => Ok(ItemPayload::AgentSkill {
                config: normalize_config(config)?,
            }),
            ItemType::AgentFlow => Ok(ItemPayload::AgentFlow {
                config: normalize_config(config)?,
            }),
        }
    }

    /// Text content handed to the host installer for text-based items.
    pub fn prompt_text(&self) -> Option<&str> {
        match self {
            ItemPayload::SystemPrompt { prompt } | ItemPayload::SlashCommand { prompt, .. } => {
                Some(prompt)
            }
            _ => None,
        }
    }
}

fn validate_command(command: Option<String>) -> Result<String, HubError> {
    let command = command
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| HubError::validation("Slash command requires a command token"))?;
    if !command.starts_with('/') {
        return Err(HubError::validation("Slash command must begin with /"));
    }
    Ok(command)
}

/// Normalize a skill/flow config to a JSON object. A JSON-encoded string is
/// accepted and parsed; anything that is not an object is rejected.
fn normalize_config(config: Option<Value>) -> Result<Value, HubError> {
    let Some(config) = config else {
        return Ok(empty_config());
    };
    let parsed = match config {
        Value::String(raw) => serde_json::from_str::<Value>(&raw)
            .map_err(|e| HubError::validation(format!("Invalid config JSON: {e}")))?,
        other => other,
    };
    match parsed {
        Value::Object(_) => Ok(parsed),
        Value::Null => Ok(empty_config()),
        _ => Err(HubError::validation("Config must be a JSON object")),
    }
}

/// Normalize tags arriving as either a structured array or a JSON-encoded
/// string into a bounded, deduplicated list.
pub fn normalize_tags(value: Option<&Value>) -> Vec<String> {
    let raw: Vec<String> = match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|entry| entry.as_str().map(str::to_string))
            .collect(),
        Some(Value::String(encoded)) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect(),
            // Not a JSON array: treat as a comma-separated list.
            _ => encoded.split(',').map(str::to_string).collect(),
        },
        Some(_) => Vec::new(),
    };

    let mut tags = Vec::new();
    for tag in raw {
        let tag: String = tag.trim().chars().take(MAX_TAG_LEN).collect();
        if tag.is_empty() || tags.contains(&tag) {
            continue;
        }
        tags.push(tag);
        if tags.len() == MAX_TAGS {
            break;
        }
    }
    tags
}

/// Persisted item record. Vote aggregates are derived from the vote ledger
/// at read time and never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub id: String,
    #[serde(flatten)]
    pub payload: ItemPayload,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    #[serde(default)]
    pub visibility: Visibility,
    pub created_at: i64,
    pub updated_at: i64,
}

impl ItemRecord {
    pub fn item_type(&self) -> ItemType {
        self.payload.item_type()
    }

    /// Composite storage key for this record.
    pub fn storage_key(&self) -> String {
        prompthub_storage::ItemStorage::item_key(self.item_type().as_str(), &self.id)
    }

    /// Portable reference for this item.
    pub fn import_id(&self) -> String {
        crate::models::ImportId::new(self.item_type(), &self.id).to_string()
    }

    /// Bundle download URL, when the item's config carries one.
    pub fn bundle_url(&self) -> Option<String> {
        match &self.payload {
            ItemPayload::AgentSkill { config } | ItemPayload::AgentFlow { config } => config
                .get("bundleUrl")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        }
    }

    /// Merge a partial update into this record. Present non-empty fields
    /// overwrite; absent or empty fields keep their stored values. Always
    /// bumps `updated_at`.
    pub fn apply_patch(&mut self, patch: ItemPatch, now: i64) -> Result<(), HubError> {
        if let Some(name) = patch.name.filter(|n| !n.trim().is_empty()) {
            self.name = name;
        }
        if let Some(description) = patch.description.filter(|d| !d.is_empty()) {
            self.description = description;
        }
        if patch.tags.is_some() {
            let tags = normalize_tags(patch.tags.as_ref());
            if !tags.is_empty() {
                self.tags = tags;
            }
        }
        if let Some(visibility) = patch.visibility {
            self.visibility = visibility;
        }

        match &mut self.payload {
            ItemPayload::SystemPrompt { prompt } => {
                if let Some(new_prompt) = patch.prompt.filter(|p| !p.is_empty()) {
                    *prompt = new_prompt;
                }
            }
            ItemPayload::SlashCommand { command, prompt } => {
                if patch.command.as_deref().is_some_and(|c| !c.trim().is_empty()) {
                    *command = validate_command(patch.command)?;
                }
                if let Some(new_prompt) = patch.prompt.filter(|p| !p.is_empty()) {
                    *prompt = new_prompt;
                }
            }
            ItemPayload::AgentSkill { config } | ItemPayload::AgentFlow { config } => {
                if patch.config.is_some() {
                    *config = normalize_config(patch.config)?;
                }
            }
        }

        self.updated_at = now;
        Ok(())
    }
}

/// Loose create payload as received on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl ItemDraft {
    /// Apply creation defaults and normalization, yielding a storable record.
    pub fn into_record(self, item_type: ItemType, now: i64) -> Result<ItemRecord, HubError> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| HubError::validation("Item name is required"))?;
        let payload = ItemPayload::from_parts(item_type, self.prompt, self.command, self.config)?;
        // Falls back to a time-based identifier, matching the hub's id scheme.
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| now.to_string());

        Ok(ItemRecord {
            id,
            payload,
            name,
            description: self.description.unwrap_or_default(),
            tags: normalize_tags(self.tags.as_ref()),
            author: self
                .author
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| PLATFORM_AUTHOR.to_string()),
            visibility: self.visibility.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update payload; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}
