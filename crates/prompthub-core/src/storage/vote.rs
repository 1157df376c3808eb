//! Typed voting subsystem over the vote ledger.
//!
//! Toggle detection is server-side: casting the value already on record
//! retracts the vote. The ledger recomputes aggregates from the full vote
//! set inside the mutation's write transaction, so aggregates cannot drift
//! and concurrent voters cannot lose updates.

use crate::error::HubError;
use crate::models::{ItemType, VoteSummary};
use prompthub_storage::{ItemStorage, VoteStorage};

#[derive(Debug, Clone)]
pub struct VoteStore {
    inner: VoteStorage,
}

impl VoteStore {
    pub fn new(inner: VoteStorage) -> Self {
        Self { inner }
    }

    /// Cast a vote for `requester`, returning the recomputed aggregates.
    pub fn cast(
        &self,
        item_type: ItemType,
        id: &str,
        requester: &str,
        value: i8,
    ) -> Result<VoteSummary, HubError> {
        if !(-1..=1).contains(&value) {
            return Err(HubError::validation("Vote value must be -1, 0, or 1"));
        }
        let key = ItemStorage::item_key(item_type.as_str(), id);
        let tally = self.inner.apply(&key, requester, value)?;
        Ok(VoteSummary {
            rating: tally.rating,
            rating_count: tally.count,
            user_vote: tally.user_vote,
        })
    }

    /// The requester's current vote, 0 if they never voted.
    pub fn user_vote(&self, item_type: ItemType, id: &str, requester: &str) -> Result<i8, HubError> {
        let key = ItemStorage::item_key(item_type.as_str(), id);
        Ok(self.inner.user_vote(&key, requester)?)
    }

    /// Current (rating, count) aggregates for an item.
    pub fn tally(&self, item_type: ItemType, id: &str) -> Result<(i64, u64), HubError> {
        let key = ItemStorage::item_key(item_type.as_str(), id);
        Ok(self.inner.tally(&key)?)
    }

    /// Drop every vote of a deleted item.
    pub fn clear_item(&self, item_type: ItemType, id: &str) -> Result<u64, HubError> {
        let key = ItemStorage::item_key(item_type.as_str(), id);
        Ok(self.inner.clear_item(&key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompthub_storage::Storage;
    use tempfile::tempdir;

    fn setup() -> (VoteStore, tempfile::TempDir) {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let storage = Storage::new(db_path.to_str().unwrap()).unwrap();
        (VoteStore::new(storage.votes.clone()), temp_dir)
    }

    #[test]
    fn test_toggle_idempotence() {
        let (store, _temp_dir) = setup();

        let first = store
            .cast(ItemType::SlashCommand, "resumir", "user-a", 1)
            .unwrap();
        assert_eq!(first.rating, 1);
        assert_eq!(first.rating_count, 1);
        assert_eq!(first.user_vote, 1);

        let second = store
            .cast(ItemType::SlashCommand, "resumir", "user-a", 1)
            .unwrap();
        assert_eq!(second.rating, 0);
        assert_eq!(second.rating_count, 0);
        assert_eq!(second.user_vote, 0);
    }

    #[test]
    fn test_rating_is_sum_of_final_votes_regardless_of_order() {
        let (store, _temp_dir) = setup();

        // Interleaved casts from three requesters; final values: a=+1, b=0, c=-1.
        store.cast(ItemType::AgentSkill, "x", "b", -1).unwrap();
        store.cast(ItemType::AgentSkill, "x", "a", -1).unwrap();
        store.cast(ItemType::AgentSkill, "x", "c", -1).unwrap();
        store.cast(ItemType::AgentSkill, "x", "a", 1).unwrap();
        let summary = store.cast(ItemType::AgentSkill, "x", "b", 0).unwrap();

        assert_eq!(summary.rating, 0);
        assert_eq!(summary.rating_count, 2);
        assert_eq!(store.user_vote(ItemType::AgentSkill, "x", "a").unwrap(), 1);
        assert_eq!(store.user_vote(ItemType::AgentSkill, "x", "b").unwrap(), 0);
        assert_eq!(store.user_vote(ItemType::AgentSkill, "x", "c").unwrap(), -1);
        assert_eq!(store.tally(ItemType::AgentSkill, "x").unwrap(), (0, 2));
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let (store, _temp_dir) = setup();
        let result = store.cast(ItemType::AgentSkill, "x", "a", 2);
        assert!(matches!(result, Err(HubError::Validation(_))));
    }

    #[test]
    fn test_user_vote_defaults_to_zero() {
        let (store, _temp_dir) = setup();
        assert_eq!(
            store
                .user_vote(ItemType::SystemPrompt, "ghost", "nobody")
                .unwrap(),
            0
        );
    }
}
