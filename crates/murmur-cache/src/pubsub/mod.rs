//! Redis pub/sub - the change-feed transport

mod channels;
mod publisher;
mod subscriber;

pub use channels::{FeedChannel, FEED_CHANNEL};
pub use publisher::{FeedEvent, Publisher, EVENT_POST_CREATE, EVENT_REACTION_UPDATE};
pub use subscriber::{
    ReceivedMessage, Subscriber, SubscriberConfig, SubscriberError, SubscriberResult,
};
