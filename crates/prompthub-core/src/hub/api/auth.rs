//! Connection-key validation.

use crate::hub::server::HubConfig;
use crate::models::{AuthRequest, AuthResponse, HubUser};
use axum::{Json, extract::Extension};

// POST /v1/auth
pub async fn validate_key(
    Extension(config): Extension<HubConfig>,
    Json(request): Json<AuthRequest>,
) -> Json<AuthResponse> {
    match &config.connection_key {
        Some(expected) if *expected == request.connection_key => Json(AuthResponse {
            valid: true,
            user: Some(HubUser {
                id: "hub-user".to_string(),
                name: config
                    .key_holder
                    .clone()
                    .unwrap_or_else(|| "Hub User".to_string()),
            }),
            error: None,
        }),
        Some(_) => Json(AuthResponse {
            valid: false,
            user: None,
            error: Some("Invalid connection key".to_string()),
        }),
        None => Json(AuthResponse {
            valid: false,
            user: None,
            error: Some("Hub connection key is not configured".to_string()),
        }),
    }
}
