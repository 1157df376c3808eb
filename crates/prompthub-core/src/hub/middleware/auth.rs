//! Bearer-token enforcement for the remote hub's mutating routes.

use crate::hub::error::ApiError;
use axum::{
    extract::Request,
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Requester identity used when no bearer token accompanies a request on a
/// local hub.
pub const LOCAL_REQUESTER: &str = "local-user";

/// Extract the bearer token from a request's headers.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

pub async fn require_connection_key(
    req: Request,
    next: Next,
    connection_key: Option<String>,
) -> Response {
    let Some(expected) = connection_key else {
        return ApiError::unauthorized("Hub connection key is not configured").into_response();
    };

    let Some(token) = bearer_token(req.headers()) else {
        return ApiError::unauthorized("Missing Authorization header").into_response();
    };

    if token != expected {
        return ApiError::unauthorized("Invalid connection key").into_response();
    }

    next.run(req).await
}
