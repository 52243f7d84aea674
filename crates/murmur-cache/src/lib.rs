//! # murmur-cache
//!
//! Redis layer providing the change-feed transport: the API process
//! publishes feed events, the gateway process subscribes and fans them out
//! to connected WebSocket clients.

pub mod pool;
pub mod pubsub;

// Re-export pool types
pub use pool::{create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool};

// Re-export pubsub types
pub use pubsub::{
    FeedChannel, FeedEvent, Publisher, ReceivedMessage, Subscriber, SubscriberConfig,
    SubscriberError, SubscriberResult, EVENT_POST_CREATE, EVENT_REACTION_UPDATE, FEED_CHANNEL,
};
