use anyhow::{Context, Result};
use prompthub_core::HubCore;
use prompthub_core::hub::{HubConfig, HubServer};
use std::sync::Arc;
use tokio::sync::broadcast;

fn database_path() -> Result<String> {
    if let Ok(path) = std::env::var("PROMPTHUB_DB")
        && !path.trim().is_empty()
    {
        return Ok(path);
    }

    let dir = dirs::data_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("prompthub");
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory {}", dir.display()))?;
    Ok(dir.join("hub.db").to_string_lossy().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing logger
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,prompthub_server=debug".into()),
        )
        .with_target(false)
        .init();

    let config = HubConfig::default();
    tracing::info!(mode = ?config.mode, "Starting PromptHub hub server");

    let db_path = database_path()?;
    let core = Arc::new(HubCore::new(&db_path).context("Failed to initialize hub core")?);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    HubServer::new(config, core).run(shutdown_rx).await
}
