//! # murmur-client
//!
//! Client-side core of the board: the persistent device identity, the
//! optimistic feed reconciler, and a session that drives both against the
//! REST API and the gateway's change feed.
//!
//! The reconciler (`feed`) is pure data - no I/O, no rendering - so every
//! merge rule is unit-testable. `session` owns the I/O and funnels all
//! three event sources (fetch, change feed, local optimistic inserts)
//! through that single merge path.

pub mod device;
pub mod feed;
pub mod http;
pub mod session;

pub use device::{DeviceStore, DEVICE_ID_KEY};
pub use feed::{
    submission_precheck, EntryId, Feed, FeedEntry, ReactionDelta, MAX_CHARS, MAX_ENTRIES,
    PENDING_PREFIX,
};
pub use http::{ApiClient, ClientError};
pub use session::FeedSession;
