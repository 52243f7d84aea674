//! Redis pub/sub publisher.
//!
//! Publishes feed events for distribution to WebSocket clients.

use crate::pool::{RedisPool, RedisResult};
use crate::pubsub::FeedChannel;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Event name for a newly inserted post
pub const EVENT_POST_CREATE: &str = "POST_CREATE";

/// Event name for a change to a post's reaction counts
pub const EVENT_REACTION_UPDATE: &str = "REACTION_UPDATE";

/// Event wrapper for pub/sub messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEvent {
    /// Event type name (e.g., "POST_CREATE")
    pub event_type: String,
    /// Event payload
    pub data: serde_json::Value,
}

impl FeedEvent {
    /// Create a new event
    #[must_use]
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Redis pub/sub publisher
#[derive(Clone)]
pub struct Publisher {
    pool: RedisPool,
}

impl Publisher {
    /// Create a new publisher
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }

    /// Publish an event to a channel
    pub async fn publish(&self, channel: &FeedChannel, event: &FeedEvent) -> RedisResult<u32> {
        let mut conn = self.pool.get().await?;
        let channel_name = channel.name();
        let payload = event.to_json()?;

        let receivers: u32 = conn.publish(&channel_name, &payload).await?;

        tracing::debug!(
            channel = %channel_name,
            event_type = %event.event_type,
            receivers = receivers,
            "Published event"
        );

        Ok(receivers)
    }

    /// Publish a post-created event to the feed
    pub async fn publish_post_create(&self, post_data: serde_json::Value) -> RedisResult<u32> {
        let event = FeedEvent::new(EVENT_POST_CREATE, post_data);
        self.publish(&FeedChannel::Feed, &event).await
    }

    /// Publish a reaction-count update to the feed
    pub async fn publish_reaction_update(&self, update_data: serde_json::Value) -> RedisResult<u32> {
        let event = FeedEvent::new(EVENT_REACTION_UPDATE, update_data);
        self.publish(&FeedChannel::Feed, &event).await
    }
}
