//! Host-application collaborator that materializes imported items.

use crate::models::HubItem;
use async_trait::async_trait;
use std::path::Path;

/// Implemented by the embedding host. Text-based items are applied from
/// their content directly; bundle items are handed over as a fully
/// downloaded archive.
#[async_trait]
pub trait ItemInstaller: Send + Sync {
    async fn apply_system_prompt(&self, item: &HubItem) -> anyhow::Result<()>;

    async fn apply_slash_command(&self, item: &HubItem) -> anyhow::Result<()>;

    /// Install a bundle from a completed archive download. The archive path
    /// is only valid for the duration of the call.
    async fn install_bundle(&self, item: &HubItem, archive: &Path) -> anyhow::Result<()>;
}
