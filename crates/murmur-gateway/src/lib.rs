//! # murmur-gateway
//!
//! WebSocket push channel for the board's change feed. Subscribes to the
//! Redis feed channel and fans every event out to all connected clients.
//! There is exactly one feed, so connections need no subscription protocol:
//! connect, receive a hello, then receive events until you hang up.

pub mod connection;
pub mod dispatcher;
pub mod protocol;
pub mod server;

pub use connection::ConnectionManager;
pub use dispatcher::spawn_dispatcher;
pub use protocol::GatewayMessage;
pub use server::{create_app, run, GatewayState};
