//! Telemetry sink for hub activity.
//!
//! Recording is always best-effort: a sink that fails must never fail the
//! operation being recorded, so the trait is infallible and implementations
//! swallow their own errors.

use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait TelemetrySink: Send + Sync {
    async fn record(&self, event: &str, properties: Value);
}

/// Default sink: structured log lines only.
#[derive(Debug, Default, Clone)]
pub struct TracingTelemetry;

#[async_trait]
impl TelemetrySink for TracingTelemetry {
    async fn record(&self, event: &str, properties: Value) {
        tracing::info!(target: "telemetry", event = %event, properties = %properties, "telemetry event");
    }
}
