//! Event dispatcher
//!
//! Bridges the Redis feed subscriber onto the connection registry: every
//! event received on the feed channel becomes a gateway message broadcast
//! to all connected clients.

use std::sync::Arc;

use murmur_cache::Subscriber;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::connection::ConnectionManager;
use crate::protocol::GatewayMessage;

/// Spawn the task that pumps subscriber messages to connections.
///
/// The subscriber is borrowed, not owned: the caller must keep it alive for
/// as long as events should flow (dropping it stops the listener). Payloads
/// that did not parse as feed events are logged and dropped rather than
/// forwarded raw.
pub fn spawn_dispatcher(subscriber: &Subscriber, manager: Arc<ConnectionManager>) -> JoinHandle<()> {
    let mut rx = subscriber.subscribe();

    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(received) => {
                    let Some(event) = received.event else {
                        warn!(channel = %received.channel, "Dropping unparseable feed payload");
                        continue;
                    };

                    let message = GatewayMessage::Event {
                        event_type: event.event_type,
                        data: event.data,
                    };
                    let delivered = manager.broadcast(&message);
                    debug!(delivered, "Feed event dispatched");
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Dispatcher lagged behind the feed");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    debug!("Subscriber closed, dispatcher stopping");
                    break;
                }
            }
        }
    })
}
