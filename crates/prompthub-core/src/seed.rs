//! Starter catalog inserted on first boot.
//!
//! Seeding is driven by an explicit version marker, not by row count, so a
//! hub whose items were all deleted stays empty. Bumping `SEED_VERSION`
//! re-runs the insert; ids that already exist are left untouched.

use crate::HubCore;
use crate::error::HubError;
use crate::models::{ItemDraft, ItemType};
use anyhow::Result;
use tracing::info;

/// Version of the starter catalog below.
pub const SEED_VERSION: u32 = 1;

pub fn ensure_seeded(core: &HubCore) -> Result<()> {
    let applied = core.storage.settings.seed_version()?;
    if applied >= SEED_VERSION {
        return Ok(());
    }

    info!("Seeding hub catalog (version {SEED_VERSION})");
    let mut inserted = 0usize;
    for (item_type, draft) in starter_catalog() {
        match core.items.create(item_type, draft) {
            Ok(_) => inserted += 1,
            // An id collision means the operator already published over a
            // starter slot; keep their item.
            Err(HubError::Validation(_)) => {}
            Err(e) => return Err(anyhow::anyhow!(e)),
        }
    }
    core.storage.settings.set_seed_version(SEED_VERSION)?;
    info!("Seeded {inserted} starter items");
    Ok(())
}

fn prompt(id: &str, name: &str, description: &str, prompt: &str, tags: &[&str]) -> (ItemType, ItemDraft) {
    (
        ItemType::SystemPrompt,
        ItemDraft {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            prompt: Some(prompt.to_string()),
            tags: Some(serde_json::json!(tags)),
            ..ItemDraft::default()
        },
    )
}

fn command(
    id: &str,
    name: &str,
    description: &str,
    command: &str,
    prompt: &str,
    tags: &[&str],
) -> (ItemType, ItemDraft) {
    (
        ItemType::SlashCommand,
        ItemDraft {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            command: Some(command.to_string()),
            prompt: Some(prompt.to_string()),
            tags: Some(serde_json::json!(tags)),
            ..ItemDraft::default()
        },
    )
}

fn starter_catalog() -> Vec<(ItemType, ItemDraft)> {
    vec![
        prompt(
            "creative-writer",
            "Creative Writer",
            "A system prompt for creative writing assistance",
            "You are a creative writing assistant. Help users craft engaging stories, poems, and other creative content.",
            &["writing", "creative", "general"],
        ),
        prompt(
            "data-analyst",
            "Data Analyst",
            "A system prompt for data analysis and visualization",
            "You are a data analyst. Help users understand their data, create insights, and suggest visualizations.",
            &["data", "analysis", "business"],
        ),
        command(
            "translate",
            "Translate",
            "Translate text while preserving tone and context",
            "/translate",
            "Translate the following text, preserving cultural context and nuances.",
            &["translation", "language"],
        ),
        command(
            "summarize",
            "Summarize",
            "Condense long text into key points",
            "/summarize",
            "Summarize the following text in 3-5 key bullet points.",
            &["summary", "productivity", "text"],
        ),
        command(
            "follow-up",
            "Follow-up Questions",
            "Generate intelligent follow-up questions",
            "/questions",
            "Generate 3-5 intelligent follow-up questions based on the conversation context.",
            &["questions", "conversation", "engagement"],
        ),
        command(
            "explain-code",
            "Explain Code",
            "Explain code clearly and educationally",
            "/explain",
            "Explain the following code in clear, educational terms.",
            &["coding", "education", "programming"],
        ),
        command(
            "continue",
            "Continue Conversation",
            "Continue a conversation naturally",
            "/continue",
            "Continue the conversation naturally based on the context.",
            &["conversation", "continuation", "dialogue"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_seed_runs_once() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let core = HubCore::new(db_path.to_str().unwrap()).unwrap();

        let prompts = core.items.list(ItemType::SystemPrompt).unwrap();
        let commands = core.items.list(ItemType::SlashCommand).unwrap();
        assert_eq!(prompts.len(), 2);
        assert_eq!(commands.len(), 5);
        assert_eq!(core.storage.settings.seed_version().unwrap(), SEED_VERSION);

        // A second pass is a no-op.
        ensure_seeded(&core).unwrap();
        assert_eq!(core.items.list(ItemType::SystemPrompt).unwrap().len(), 2);
    }

    #[test]
    fn test_deleting_everything_does_not_reseed() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let core = HubCore::new(db_path.to_str().unwrap()).unwrap();

        for item_type in ItemType::ALL {
            for record in core.items.list(item_type).unwrap() {
                assert!(core.items.delete(item_type, &record.id).unwrap());
            }
        }

        ensure_seeded(&core).unwrap();
        for item_type in ItemType::ALL {
            assert!(core.items.list(item_type).unwrap().is_empty());
        }
    }
}
