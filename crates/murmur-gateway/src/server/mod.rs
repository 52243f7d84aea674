//! Gateway server
//!
//! Accepts WebSocket connections on /gateway, greets each with a hello
//! frame, and forwards broadcast feed events until the client hangs up.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use murmur_cache::{FeedChannel, Subscriber, SubscriberConfig};
use murmur_common::{AppConfig, AppError};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::connection::ConnectionManager;
use crate::dispatcher::spawn_dispatcher;
use crate::protocol::GatewayMessage;

/// Outbound queue depth per connection before events are dropped
const OUTBOUND_BUFFER: usize = 64;

/// Shared gateway state
#[derive(Clone)]
pub struct GatewayState {
    manager: Arc<ConnectionManager>,
}

impl GatewayState {
    /// Create state around a connection manager
    #[must_use]
    pub fn new(manager: Arc<ConnectionManager>) -> Self {
        Self { manager }
    }

    /// Get the connection manager
    pub fn manager(&self) -> &Arc<ConnectionManager> {
        &self.manager
    }
}

/// Build the gateway router
pub fn create_app(state: GatewayState) -> Router {
    Router::new()
        .route("/gateway", get(gateway_upgrade))
        .with_state(state)
}

/// Upgrade handler for GET /gateway
async fn gateway_upgrade(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one WebSocket connection to completion
async fn handle_socket(socket: WebSocket, state: GatewayState) {
    let session_id = Uuid::new_v4().to_string();
    let (tx, mut rx) = mpsc::channel::<GatewayMessage>(OUTBOUND_BUFFER);
    let (mut sink, mut stream) = socket.split();

    state.manager.add_connection(session_id.clone(), tx);
    info!(session_id = %session_id, "Client connected");

    let hello = GatewayMessage::Hello {
        session_id: session_id.clone(),
    };
    if let Ok(frame) = hello.to_json() {
        if sink.send(Message::Text(frame)).await.is_err() {
            state.manager.remove_connection(&session_id);
            return;
        }
    }

    loop {
        tokio::select! {
            outbound = rx.recv() => {
                let Some(message) = outbound else { break };
                let Ok(frame) = message.to_json() else {
                    warn!(session_id = %session_id, "Failed to serialize outbound frame");
                    continue;
                };
                if sink.send(Message::Text(frame)).await.is_err() {
                    break;
                }
            }

            inbound = stream.next() => {
                match inbound {
                    // Clients have nothing to say; tolerate pings and ignore text
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.manager.remove_connection(&session_id);
    debug!(session_id = %session_id, "Client disconnected");
}

/// Run the gateway: subscribe to the feed, spawn the dispatcher, serve
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let manager = ConnectionManager::new_shared();

    let subscriber_config = SubscriberConfig {
        redis_url: config.redis.url.clone(),
        ..Default::default()
    };
    // Must outlive the serve loop: dropping the subscriber stops the feed
    let subscriber = Subscriber::start(subscriber_config, vec![FeedChannel::Feed]);
    let _dispatcher = spawn_dispatcher(&subscriber, Arc::clone(&manager));

    let state = GatewayState::new(manager);
    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.gateway.port));
    info!("Gateway listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Gateway error: {}", e)))?;

    Ok(())
}
