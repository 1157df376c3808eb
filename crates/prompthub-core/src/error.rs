//! Domain error taxonomy for hub operations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    /// Malformed input: unknown item type, bad config JSON, invalid vote value.
    #[error("{0}")]
    Validation(String),
    /// The addressed resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Missing or invalid credentials on a gated operation.
    #[error("{0}")]
    Unauthorized(String),
    /// A bundle import was attempted while downloads are disabled.
    #[error("Item downloads are disabled on this instance")]
    DownloadsDisabled,
    /// Storage or network failure underneath a hub operation.
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl HubError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn item_not_found() -> Self {
        Self::NotFound("Item")
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(anyhow::anyhow!(message.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(HubError::item_not_found().to_string(), "Item not found");
        assert_eq!(
            HubError::validation("Invalid item type").to_string(),
            "Invalid item type"
        );
        assert_eq!(
            HubError::DownloadsDisabled.to_string(),
            "Item downloads are disabled on this instance"
        );
    }
}
