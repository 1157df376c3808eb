pub mod auth;
pub mod explore;
pub mod items;
pub mod votes;

use crate::HubCore;
use crate::error::HubError;
use crate::models::{HubItem, ItemRecord, ItemType};

/// Attach vote aggregates (and optionally the requester's vote and the
/// item's import id) to a stored record.
pub(crate) fn assemble_item(
    core: &HubCore,
    record: ItemRecord,
    requester: Option<&str>,
    with_import_id: bool,
) -> Result<HubItem, HubError> {
    let item_type = record.item_type();
    let (rating, rating_count) = core.votes.tally(item_type, &record.id)?;
    let user_vote = match requester {
        Some(user) => Some(core.votes.user_vote(item_type, &record.id, user)?),
        None => None,
    };

    Ok(HubItem {
        import_id: with_import_id.then(|| record.import_id()),
        record,
        rating,
        rating_count,
        user_vote,
    })
}

/// Parse a path segment into the closed item-type set.
pub(crate) fn parse_item_type(raw: &str) -> Option<ItemType> {
    raw.parse::<ItemType>().ok()
}

/// Whether the request's bearer token matches the configured connection
/// key. Private items are only readable by such requesters.
pub(crate) fn is_authorized(
    config: &crate::hub::server::HubConfig,
    headers: &axum::http::HeaderMap,
) -> bool {
    match crate::hub::middleware::auth::bearer_token(headers) {
        Some(token) => config.connection_key.as_deref() == Some(token.as_str()),
        None => false,
    }
}
