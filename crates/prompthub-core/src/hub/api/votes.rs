//! Vote routes.

use crate::HubCore;
use crate::hub::ApiError;
use crate::hub::api::parse_item_type;
use crate::hub::middleware::auth::{LOCAL_REQUESTER, bearer_token};
use crate::models::{ItemType, UserVoteResponse, VoteRequest, VoteResponse};
use axum::{
    Json,
    extract::{Extension, Path},
    http::HeaderMap,
};
use std::sync::Arc;

// POST /v1/{itemType}/{id}/vote
pub async fn cast(
    Extension(core): Extension<Arc<HubCore>>,
    Path((item_type, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(request): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, ApiError> {
    let (item_type, requester) = resolve(&core, &item_type, &id, &headers)?;

    let summary = core.votes.cast(item_type, &id, &requester, request.vote)?;

    Ok(Json(VoteResponse {
        success: true,
        rating: summary.rating,
        rating_count: summary.rating_count,
        user_vote: summary.user_vote,
        error: None,
    }))
}

// GET /v1/{itemType}/{id}/vote
pub async fn user_vote(
    Extension(core): Extension<Arc<HubCore>>,
    Path((item_type, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<UserVoteResponse>, ApiError> {
    let (item_type, requester) = resolve(&core, &item_type, &id, &headers)?;

    let user_vote = core.votes.user_vote(item_type, &id, &requester)?;

    Ok(Json(UserVoteResponse {
        success: true,
        user_vote,
        error: None,
    }))
}

/// Shared lookup: parse the type, require the item to exist, and resolve the
/// requester identity (bearer token, or the local placeholder on a local hub).
fn resolve(
    core: &HubCore,
    item_type: &str,
    id: &str,
    headers: &HeaderMap,
) -> Result<(ItemType, String), ApiError> {
    let item_type = parse_item_type(item_type).ok_or_else(|| ApiError::not_found("Item"))?;
    if core.items.get(item_type, id)?.is_none() {
        return Err(ApiError::not_found("Item"));
    }
    let requester = bearer_token(headers).unwrap_or_else(|| LOCAL_REQUESTER.to_string());
    Ok((item_type, requester))
}
