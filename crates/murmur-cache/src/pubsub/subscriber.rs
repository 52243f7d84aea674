//! Redis pub/sub subscriber.
//!
//! Subscribes to the feed channel and hands received events to any number of
//! in-process consumers through a broadcast channel. The listener runs as a
//! background task and reconnects with a fixed delay after transport errors.

use crate::pubsub::{FeedChannel, FeedEvent};
use futures_util::StreamExt;
use redis::Client;
use tokio::sync::{broadcast, mpsc};

/// Error type for subscriber operations
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Failed to parse event: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Result type for subscriber operations
pub type SubscriberResult<T> = Result<T, SubscriberError>;

/// Received message from pub/sub
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    /// Channel the message was received on
    pub channel: FeedChannel,
    /// Parsed event (if valid JSON)
    pub event: Option<FeedEvent>,
    /// Raw payload
    pub payload: String,
}

impl ReceivedMessage {
    /// Create from raw Redis message
    fn from_redis(channel_name: &str, payload: String) -> Self {
        let channel = FeedChannel::parse(channel_name);
        let event = serde_json::from_str(&payload).ok();

        Self {
            channel,
            event,
            payload,
        }
    }
}

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Redis connection URL
    pub redis_url: String,
    /// Channel buffer size for broadcast
    pub broadcast_buffer: usize,
    /// Reconnection delay in milliseconds
    pub reconnect_delay_ms: u64,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            broadcast_buffer: 1024,
            reconnect_delay_ms: 1000,
        }
    }
}

/// Redis pub/sub subscriber bound to a fixed channel set.
///
/// Dropping the subscriber (or calling [`Subscriber::shutdown`]) stops the
/// background listener.
pub struct Subscriber {
    /// Broadcast sender for received messages
    broadcast_tx: broadcast::Sender<ReceivedMessage>,
    /// Shutdown signal for the background listener
    shutdown_tx: mpsc::Sender<()>,
}

impl Subscriber {
    /// Create a new subscriber and start the background listener.
    ///
    /// The channel set is fixed for the lifetime of the subscriber; the
    /// board has a single feed, so there is no dynamic subscribe protocol.
    pub fn start(config: SubscriberConfig, channels: Vec<FeedChannel>) -> Self {
        let (broadcast_tx, _) = broadcast::channel(config.broadcast_buffer);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        tokio::spawn(Self::listener_loop(
            config,
            channels,
            broadcast_tx.clone(),
            shutdown_rx,
        ));

        Self {
            broadcast_tx,
            shutdown_tx,
        }
    }

    /// Get a receiver for incoming messages
    pub fn subscribe(&self) -> broadcast::Receiver<ReceivedMessage> {
        self.broadcast_tx.subscribe()
    }

    /// Signal the background listener to stop
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }

    /// Background listener loop with reconnection
    async fn listener_loop(
        config: SubscriberConfig,
        channels: Vec<FeedChannel>,
        broadcast_tx: broadcast::Sender<ReceivedMessage>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        loop {
            match Self::run_listener(&config, &channels, &broadcast_tx, &mut shutdown_rx).await {
                Ok(()) => {
                    tracing::info!("Subscriber shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Subscriber error, reconnecting...");
                    tokio::time::sleep(tokio::time::Duration::from_millis(
                        config.reconnect_delay_ms,
                    ))
                    .await;
                }
            }
        }
    }

    /// Run the listener until shutdown (Ok) or transport error (Err)
    async fn run_listener(
        config: &SubscriberConfig,
        channels: &[FeedChannel],
        broadcast_tx: &broadcast::Sender<ReceivedMessage>,
        shutdown_rx: &mut mpsc::Receiver<()>,
    ) -> SubscriberResult<()> {
        let client = Client::open(config.redis_url.as_str())?;
        let mut pubsub = client.get_async_pubsub().await?;

        for channel in channels {
            pubsub.subscribe(channel.name()).await?;
        }

        tracing::info!(channels = channels.len(), "Subscriber connected to Redis");

        let mut stream = pubsub.on_message();

        loop {
            tokio::select! {
                msg = stream.next() => {
                    match msg {
                        Some(msg) => {
                            let channel_name = msg.get_channel_name().to_string();
                            let payload: String = msg.get_payload().unwrap_or_default();

                            let received = ReceivedMessage::from_redis(&channel_name, payload);

                            // Ignore send errors - there may be no receivers yet
                            let _ = broadcast_tx.send(received);

                            tracing::trace!(channel = %channel_name, "Received pub/sub message");
                        }
                        None => {
                            return Err(SubscriberError::Redis(redis::RedisError::from((
                                redis::ErrorKind::IoError,
                                "pub/sub stream ended",
                            ))));
                        }
                    }
                }

                // Some(()) is an explicit shutdown; None means every handle
                // was dropped, which amounts to the same thing
                _ = shutdown_rx.recv() => {
                    return Ok(());
                }
            }
        }
    }
}
