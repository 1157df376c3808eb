//! Import/apply pipeline: resolve, classify, apply or download+install,
//! record.

pub mod installer;
pub mod pipeline;

pub use installer::ItemInstaller;
pub use pipeline::ImportPipeline;

/// Host-level feature flag gating bundle downloads.
pub fn downloads_enabled_from_env() -> bool {
    std::env::var("PROMPTHUB_DOWNLOADS_ENABLED")
        .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
