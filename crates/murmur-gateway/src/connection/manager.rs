//! Connection manager
//!
//! Tracks all active WebSocket connections using DashMap for thread-safe
//! access. Every connection sees every feed event, so the registry is a
//! flat session-id -> sender map.

use crate::protocol::GatewayMessage;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Outbound senders by session ID
    connections: DashMap<String, mpsc::Sender<GatewayMessage>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(&self, session_id: String, sender: mpsc::Sender<GatewayMessage>) {
        self.connections.insert(session_id.clone(), sender);
        tracing::debug!(session_id = %session_id, "Connection added");
    }

    /// Remove a connection
    pub fn remove_connection(&self, session_id: &str) {
        if self.connections.remove(session_id).is_some() {
            tracing::debug!(session_id = %session_id, "Connection removed");
        }
    }

    /// Number of live connections
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Send a message to every connection.
    ///
    /// A connection whose channel is full or closed is skipped; the socket
    /// task cleans it up when it notices the hangup.
    pub fn broadcast(&self, message: &GatewayMessage) -> usize {
        let mut delivered = 0;
        for entry in &self.connections {
            if entry.value().try_send(message.clone()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_broadcast_reaches_all_connections() {
        let manager = ConnectionManager::new();
        let (tx_a, mut rx_a) = mpsc::channel(8);
        let (tx_b, mut rx_b) = mpsc::channel(8);
        manager.add_connection("a".to_string(), tx_a);
        manager.add_connection("b".to_string(), tx_b);

        let message = GatewayMessage::Event {
            event_type: "POST_CREATE".to_string(),
            data: serde_json::json!({}),
        };
        let delivered = manager.broadcast(&message);

        assert_eq!(delivered, 2);
        assert!(rx_a.recv().await.is_some());
        assert!(rx_b.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_removed_connection_is_skipped() {
        let manager = ConnectionManager::new();
        let (tx, _rx) = mpsc::channel(8);
        manager.add_connection("a".to_string(), tx);
        assert_eq!(manager.connection_count(), 1);

        manager.remove_connection("a");
        assert_eq!(manager.connection_count(), 0);

        let message = GatewayMessage::Event {
            event_type: "POST_CREATE".to_string(),
            data: serde_json::json!({}),
        };
        assert_eq!(manager.broadcast(&message), 0);
    }
}
