//! Typed façade over the hub's HTTP API.
//!
//! Every method re-reads the persisted connection key, attaches it as a
//! bearer token, and normalizes the outcome to `{success, data, error}`.
//! Transport and parse failures never escape this layer.

use crate::models::{
    AuthRequest, AuthResponse, DeleteResponse, ExploreResponse, ImportId, ItemDraft, ItemPatch,
    ItemResponse, ItemType, PullResponse, UserItemsResponse, UserVoteResponse, VoteRequest,
    VoteResponse,
};
use anyhow::Result;
use prompthub_storage::{HubSettings, SettingsStorage};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_HUB_URL: &str = "http://127.0.0.1:5001";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway configuration, threaded through the constructor so tests and
/// embedders never depend on ambient global state.
#[derive(Debug, Clone)]
pub struct HubClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    /// Treat the client as connected even without a stored key. Replaces
    /// the old process-wide demo-mode toggle.
    pub assume_connected: bool,
}

impl Default for HubClientConfig {
    fn default() -> Self {
        let base_url = std::env::var("PROMPTHUB_HUB_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HUB_URL.to_string());

        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            assume_connected: false,
        }
    }
}

/// Normalized gateway outcome: `{success, ...payload, error}`.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> GatewayResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<Result<T>> for GatewayResponse<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string()),
        }
    }
}

/// Error envelope shape shared by all hub failure responses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

pub struct HubClient {
    http: reqwest::Client,
    base_url: String,
    assume_connected: bool,
    settings: SettingsStorage,
}

impl HubClient {
    pub fn new(config: HubClientConfig, settings: SettingsStorage) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(config.timeout)
                .user_agent("PromptHub/0.1")
                .build()
                .unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            assume_connected: config.assume_connected,
            settings,
        }
    }

    /// The stored connection key, re-read on every request.
    fn connection_key(&self) -> Option<String> {
        self.settings
            .hub_settings()
            .ok()
            .and_then(|s| s.connection_key)
            .filter(|key| !key.trim().is_empty())
    }

    pub fn is_connected(&self) -> bool {
        self.assume_connected || self.connection_key().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let mut request = self.http.get(self.url(path));
        if let Some(key) = self.connection_key() {
            request = request.bearer_auth(key);
        }
        Self::decode(request.send().await?).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let mut request = self.http.post(self.url(path)).json(body);
        if let Some(key) = self.connection_key() {
            request = request.bearer_auth(key);
        }
        Self::decode(request.send().await?).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let mut request = self.http.delete(self.url(path));
        if let Some(key) = self.connection_key() {
            request = request.bearer_auth(key);
        }
        Self::decode(request.send().await?).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                && let Some(message) = envelope.error
            {
                anyhow::bail!(message);
            }
            anyhow::bail!("Hub returned status {status}");
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    // --- Hub routes, mirrored 1:1 ---

    pub async fn explore(&self) -> GatewayResponse<ExploreResponse> {
        self.get_json("/v1/explore").await.into()
    }

    pub async fn pull(&self, item_type: ItemType, id: &str) -> GatewayResponse<PullResponse> {
        self.get_json(&format!("/v1/{item_type}/{id}/pull")).await.into()
    }

    pub async fn pull_import(&self, import_id: &ImportId) -> GatewayResponse<PullResponse> {
        self.pull(import_id.item_type, &import_id.id).await
    }

    pub async fn authenticate(&self, connection_key: &str) -> GatewayResponse<AuthResponse> {
        let body = AuthRequest {
            connection_key: connection_key.to_string(),
        };
        self.post_json("/v1/auth", &body).await.into()
    }

    pub async fn user_items(&self) -> GatewayResponse<UserItemsResponse> {
        self.get_json("/v1/items").await.into()
    }

    pub async fn create_item(
        &self,
        item_type: ItemType,
        draft: &ItemDraft,
    ) -> GatewayResponse<ItemResponse> {
        self.post_json(&format!("/v1/{item_type}/create"), draft)
            .await
            .into()
    }

    pub async fn update_item(
        &self,
        item_type: ItemType,
        id: &str,
        patch: &ItemPatch,
    ) -> GatewayResponse<ItemResponse> {
        self.post_json(&format!("/v1/{item_type}/{id}/update"), patch)
            .await
            .into()
    }

    pub async fn delete_item(
        &self,
        item_type: ItemType,
        id: &str,
    ) -> GatewayResponse<DeleteResponse> {
        self.delete_json(&format!("/v1/{item_type}/{id}")).await.into()
    }

    pub async fn vote(
        &self,
        item_type: ItemType,
        id: &str,
        value: i8,
    ) -> GatewayResponse<VoteResponse> {
        let body = VoteRequest { vote: value };
        self.post_json(&format!("/v1/{item_type}/{id}/vote"), &body)
            .await
            .into()
    }

    pub async fn user_vote(
        &self,
        item_type: ItemType,
        id: &str,
    ) -> GatewayResponse<UserVoteResponse> {
        self.get_json(&format!("/v1/{item_type}/{id}/vote")).await.into()
    }

    // --- Settings lifecycle (local store, no round trip) ---

    pub fn hub_settings(&self) -> GatewayResponse<HubSettings> {
        self.settings.hub_settings().into()
    }

    pub fn save_settings(&self, connection_key: &str) -> GatewayResponse<HubSettings> {
        let settings = HubSettings {
            connection_key: Some(connection_key.to_string()),
        };
        match self.settings.update_hub_settings(&settings) {
            Ok(()) => GatewayResponse::ok(settings),
            Err(e) => GatewayResponse::fail(e.to_string()),
        }
    }

    pub fn disconnect(&self) -> GatewayResponse<()> {
        match self.settings.clear_connection_key() {
            Ok(()) => GatewayResponse::ok(()),
            Err(e) => GatewayResponse::fail(e.to_string()),
        }
    }
}
