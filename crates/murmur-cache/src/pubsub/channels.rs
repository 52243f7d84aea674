//! Pub/sub channel definitions.
//!
//! The board has exactly one feed, so the channel space is flat: a single
//! broadcast channel that every connected client observes.

/// Channel carrying all feed events (post inserts, reaction count updates)
pub const FEED_CHANNEL: &str = "feed";

/// Pub/sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeedChannel {
    /// The board-wide feed
    Feed,
    /// Custom channel name (tests, tooling)
    Custom(String),
}

impl FeedChannel {
    /// Create a custom channel
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Get the Redis channel name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Feed => FEED_CHANNEL.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name back to a `FeedChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == FEED_CHANNEL {
            Self::Feed
        } else {
            Self::Custom(name.to_string())
        }
    }
}

impl std::fmt::Display for FeedChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
