pub mod import_id;
pub mod item;
pub mod wire;

pub use import_id::{IMPORT_ID_NAMESPACE, ImportId};
pub use item::{
    ItemDraft, ItemPatch, ItemPayload, ItemRecord, ItemType, MAX_TAG_LEN, MAX_TAGS,
    PLATFORM_AUTHOR, Visibility, normalize_tags,
};
pub use wire::{
    AuthRequest, AuthResponse, DeleteResponse, ExploreGroup, ExploreResponse, HubEvent, HubItem,
    HubUser, ItemResponse, PullResponse, UserItemsResponse, UserVoteResponse, VoteRequest,
    VoteResponse, VoteSummary,
};
