//! Hub HTTP server configuration and runner.

use crate::HubCore;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

use super::router;

/// Deployment mode of the hub. A static configuration choice: a local hub
/// trusts the host network boundary, a remote hub requires the connection
/// key as a bearer token on mutating routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HubMode {
    Local,
    Remote,
}

/// Hub server configuration
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Host to bind to (default: 127.0.0.1)
    pub host: String,
    /// Port to listen on (default: 5001)
    pub port: u16,
    /// Deployment mode
    pub mode: HubMode,
    /// Key accepted by POST /auth and required on mutating routes in remote
    /// mode
    pub connection_key: Option<String>,
    /// Display name attached to the validated key's user
    pub key_holder: Option<String>,
}

impl Default for HubConfig {
    fn default() -> Self {
        let host = std::env::var("PROMPTHUB_HTTP_HOST")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        let port = std::env::var("PROMPTHUB_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(5001);
        let mode = match std::env::var("PROMPTHUB_HUB_MODE").ok().as_deref() {
            Some("remote") => HubMode::Remote,
            _ => HubMode::Local,
        };
        let connection_key = std::env::var("PROMPTHUB_CONNECTION_KEY")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let key_holder = std::env::var("PROMPTHUB_KEY_HOLDER")
            .ok()
            .filter(|value| !value.trim().is_empty());

        Self {
            host,
            port,
            mode,
            connection_key,
            key_holder,
        }
    }
}

/// HTTP server for the hub
pub struct HubServer {
    config: HubConfig,
    core: Arc<HubCore>,
}

impl HubServer {
    pub fn new(config: HubConfig, core: Arc<HubCore>) -> Self {
        Self { config, core }
    }

    /// Run the hub server until shutdown is signalled
    pub async fn run(&self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        let app = router::build_router(self.core.clone(), &self.config);
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(mode = ?self.config.mode, "Hub server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                info!("Hub server shutting down");
            })
            .await?;

        Ok(())
    }
}
