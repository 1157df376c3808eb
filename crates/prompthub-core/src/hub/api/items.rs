//! Item CRUD routes.

use crate::HubCore;
use crate::hub::ApiError;
use crate::hub::api::{assemble_item, is_authorized, parse_item_type};
use crate::hub::middleware::auth::bearer_token;
use crate::hub::server::HubConfig;
use crate::models::{
    DeleteResponse, ExploreGroup, ItemDraft, ItemPatch, ItemResponse, ItemType, PullResponse,
    UserItemsResponse, Visibility,
};
use axum::{
    Json,
    extract::{Extension, Path},
    http::HeaderMap,
};
use serde_json::Value;
use std::sync::Arc;

// GET /v1/{itemType}/{id}/pull
pub async fn pull(
    Extension(core): Extension<Arc<HubCore>>,
    Extension(config): Extension<HubConfig>,
    Path((item_type, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<PullResponse>, ApiError> {
    // An unknown type cannot address any item, so it behaves as a miss.
    let item_type = parse_item_type(&item_type).ok_or_else(|| ApiError::not_found("Item"))?;
    let record = core
        .items
        .get(item_type, &id)?
        .ok_or_else(|| ApiError::not_found("Item"))?;
    // Private items read as missing to anyone but the key holder.
    if record.visibility == Visibility::Private && !is_authorized(&config, &headers) {
        return Err(ApiError::not_found("Item"));
    }

    let url = record.bundle_url();
    let item = assemble_item(&core, record, bearer_token(&headers).as_deref(), true)?;

    Ok(Json(PullResponse {
        item: Some(item),
        url,
        error: None,
    }))
}

// POST /v1/{itemType}/create
pub async fn create(
    Extension(core): Extension<Arc<HubCore>>,
    Path(item_type): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item_type =
        parse_item_type(&item_type).ok_or_else(|| ApiError::bad_request("Invalid item type"))?;
    let draft: ItemDraft = serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid item payload: {e}")))?;

    let record = core.items.create(item_type, draft)?;
    let item = assemble_item(&core, record, None, false)?;

    Ok(Json(ItemResponse { item, error: None }))
}

// POST /v1/{itemType}/{id}/update
pub async fn update(
    Extension(core): Extension<Arc<HubCore>>,
    Path((item_type, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<ItemResponse>, ApiError> {
    let item_type = parse_item_type(&item_type).ok_or_else(|| ApiError::not_found("Item"))?;
    let patch: ItemPatch = serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid item payload: {e}")))?;

    let record = core
        .items
        .update(item_type, &id, patch)?
        .ok_or_else(|| ApiError::not_found("Item"))?;
    let item = assemble_item(&core, record, bearer_token(&headers).as_deref(), false)?;

    Ok(Json(ItemResponse { item, error: None }))
}

// DELETE /v1/{itemType}/{id}
pub async fn remove(
    Extension(core): Extension<Arc<HubCore>>,
    Path((item_type, id)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let item_type = parse_item_type(&item_type).ok_or_else(|| ApiError::not_found("Item"))?;

    if !core.items.delete(item_type, &id)? {
        return Err(ApiError::not_found("Item"));
    }
    core.votes.clear_item(item_type, &id)?;

    Ok(Json(DeleteResponse {
        success: true,
        error: None,
    }))
}

// GET /v1/items
//
// Degrades gracefully: a request without a usable bearer token gets the
// empty shape, never an error.
pub async fn user_items(
    Extension(core): Extension<Arc<HubCore>>,
    Extension(config): Extension<HubConfig>,
    headers: HeaderMap,
) -> Result<Json<UserItemsResponse>, ApiError> {
    let Some(token) = bearer_token(&headers) else {
        return Ok(Json(UserItemsResponse::default()));
    };
    if config.connection_key.as_deref() != Some(token.as_str()) {
        return Ok(Json(UserItemsResponse::default()));
    }

    let author = config
        .key_holder
        .clone()
        .unwrap_or_else(|| "Hub User".to_string());

    let mut response = UserItemsResponse::default();
    for item_type in ItemType::ALL {
        let mut items = Vec::new();
        for record in core.items.list(item_type)? {
            if record.author == author {
                items.push(assemble_item(&core, record, Some(token.as_str()), true)?);
            }
        }
        if !items.is_empty() {
            response.created_by_me.insert(
                item_type.plural_key().to_string(),
                ExploreGroup {
                    total_count: items.len() as u64,
                    items,
                    has_more: false,
                },
            );
        }
    }

    Ok(Json(response))
}
