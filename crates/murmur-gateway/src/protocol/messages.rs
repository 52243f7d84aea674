//! Gateway wire messages
//!
//! Everything the gateway sends is one of these, serialized as JSON with an
//! `op` discriminator. Clients send nothing the gateway interprets; close
//! frames are the only inbound signal.

use serde::{Deserialize, Serialize};

/// Messages sent from gateway to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GatewayMessage {
    /// Sent once on connect
    Hello { session_id: String },

    /// A change-feed event (e.g. POST_CREATE, REACTION_UPDATE)
    Event {
        event_type: String,
        data: serde_json::Value,
    },
}

impl GatewayMessage {
    /// Serialize to the JSON text frame sent on the socket
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
