//! Explore listing: the full catalog grouped by item type.

use crate::HubCore;
use crate::hub::ApiError;
use crate::hub::api::{assemble_item, is_authorized};
use crate::hub::middleware::auth::bearer_token;
use crate::hub::server::HubConfig;
use crate::models::{ExploreGroup, ExploreResponse, ItemType, Visibility};
use axum::{Json, extract::Extension, http::HeaderMap};
use std::sync::Arc;

// GET /v1/explore
pub async fn explore(
    Extension(core): Extension<Arc<HubCore>>,
    Extension(config): Extension<HubConfig>,
    headers: HeaderMap,
) -> Result<Json<ExploreResponse>, ApiError> {
    let requester = bearer_token(&headers);
    let show_private = is_authorized(&config, &headers);

    let mut response = ExploreResponse::default();
    for item_type in ItemType::ALL {
        let records = core.items.list(item_type)?;
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            if record.visibility == Visibility::Private && !show_private {
                continue;
            }
            items.push(assemble_item(&core, record, requester.as_deref(), false)?);
        }
        response.groups.insert(
            item_type.plural_key().to_string(),
            ExploreGroup {
                total_count: items.len() as u64,
                items,
                // Full sets, no pagination.
                has_more: false,
            },
        );
    }

    Ok(Json(response))
}
