//! Request extractors

mod client_ip;
mod validated;

pub use client_ip::{ClientIp, LOOPBACK_SENTINEL};
pub use validated::ValidatedJson;
