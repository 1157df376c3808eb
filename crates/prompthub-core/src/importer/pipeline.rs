//! Pipeline driving an import from a pasted import id to a host-side
//! install, plus the publish path's event recording.

use crate::client::{GatewayResponse, HubClient};
use crate::error::HubError;
use crate::events::TelemetrySink;
use crate::importer::ItemInstaller;
use crate::models::{HubEvent, HubItem, ImportId, ItemDraft, ItemResponse, ItemType};
use crate::storage::AuditLog;
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::warn;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

pub struct ImportPipeline {
    client: HubClient,
    installer: Arc<dyn ItemInstaller>,
    telemetry: Arc<dyn TelemetrySink>,
    audit: AuditLog,
    http: reqwest::Client,
    downloads_enabled: bool,
}

impl ImportPipeline {
    pub fn new(
        client: HubClient,
        installer: Arc<dyn ItemInstaller>,
        telemetry: Arc<dyn TelemetrySink>,
        audit: AuditLog,
        downloads_enabled: bool,
    ) -> Self {
        Self {
            client,
            installer,
            telemetry,
            audit,
            // Downloads are the only long-running step; the client timeout
            // bounds them.
            http: reqwest::Client::builder()
                .timeout(DOWNLOAD_TIMEOUT)
                .user_agent("PromptHub/0.1")
                .build()
                .unwrap_or_default(),
            downloads_enabled,
        }
    }

    /// Import the item addressed by a pasted import id.
    pub async fn import(
        &self,
        raw_import_id: &str,
        acting_user: Option<&str>,
    ) -> GatewayResponse<()> {
        match self.run(raw_import_id, acting_user).await {
            Ok(()) => GatewayResponse::ok(()),
            Err(e) => GatewayResponse::fail(e.to_string()),
        }
    }

    async fn run(&self, raw_import_id: &str, acting_user: Option<&str>) -> Result<(), HubError> {
        // Resolve
        let import_id = ImportId::parse(raw_import_id)?;
        let response = self.client.pull_import(&import_id).await;
        if !response.success {
            return Err(HubError::upstream(
                response
                    .error
                    .unwrap_or_else(|| "Hub pull failed".to_string()),
            ));
        }
        let pull = response
            .data
            .ok_or_else(|| HubError::upstream("Hub pull returned no payload"))?;
        let item = pull.item.ok_or_else(HubError::item_not_found)?;

        // Classify and apply
        match item.record.item_type() {
            ItemType::SystemPrompt => self
                .installer
                .apply_system_prompt(&item)
                .await
                .map_err(HubError::Upstream)?,
            ItemType::SlashCommand => self
                .installer
                .apply_slash_command(&item)
                .await
                .map_err(HubError::Upstream)?,
            ItemType::AgentSkill | ItemType::AgentFlow => {
                if !self.downloads_enabled {
                    return Err(HubError::DownloadsDisabled);
                }
                let url = pull
                    .url
                    .clone()
                    .or_else(|| item.record.bundle_url())
                    .ok_or_else(|| HubError::validation("Item has no bundle URL"))?;
                let archive = self.download(&url).await?;
                self.installer
                    .install_bundle(&item, archive.path())
                    .await
                    .map_err(HubError::Upstream)?;
            }
        }

        // Record
        self.record("hub_import", &item, acting_user).await;
        Ok(())
    }

    /// Publish a new item through the gateway, recording the event.
    pub async fn publish(
        &self,
        item_type: ItemType,
        draft: &ItemDraft,
        acting_user: Option<&str>,
    ) -> GatewayResponse<ItemResponse> {
        let response = self.client.create_item(item_type, draft).await;
        if response.success
            && let Some(created) = &response.data
        {
            self.record("hub_publish", &created.item, acting_user).await;
        }
        response
    }

    /// Download the bundle archive completely before the installer sees it,
    /// so a failed or cancelled download leaves nothing installed.
    async fn download(&self, url: &str) -> Result<NamedTempFile, HubError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| HubError::Upstream(e.into()))?;
        if !response.status().is_success() {
            return Err(HubError::upstream(format!(
                "Bundle download failed with status {}",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| HubError::Upstream(e.into()))?;

        let mut archive =
            NamedTempFile::new().map_err(|e| HubError::Upstream(e.into()))?;
        archive
            .write_all(&bytes)
            .map_err(|e| HubError::Upstream(e.into()))?;
        Ok(archive)
    }

    /// Best-effort event recording; a sink failure never fails the import.
    async fn record(&self, event: &str, item: &HubItem, acting_user: Option<&str>) {
        let item_type = item.record.item_type();
        let entry = match event {
            "hub_publish" => HubEvent::publish(item_type, &item.record.id, acting_user),
            _ => HubEvent::import(item_type, &item.record.id, acting_user),
        };
        if let Err(e) = self.audit.append(&entry) {
            warn!(error = %e, "Failed to write hub audit entry");
        }

        self.telemetry
            .record(
                event,
                json!({
                    "itemType": item_type.as_str(),
                    "visibility": item.record.visibility,
                }),
            )
            .await;
    }
}
