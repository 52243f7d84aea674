//! Client session: ties the device identity, the HTTP client, and the pure
//! feed together.
//!
//! The session is cooperative and single-threaded (`&mut self` everywhere),
//! so its three event sources - fetches, change-feed events, and local
//! optimistic mutations - are serialized through one merge path by
//! construction. In-flight calls always run to completion: a second toggle
//! for the same (post, kind) while one is outstanding is ignored, never
//! queued.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

use murmur_core::entities::{ReactionKind, ReactionTally};
use murmur_core::value_objects::{DeviceId, PostId};

use crate::feed::{submission_precheck, EntryId, Feed, FeedEntry, ReactionDelta};
use crate::http::{ApiClient, ClientError, PostPayload};

/// A device's view of the board
pub struct FeedSession {
    client: ApiClient,
    device_id: DeviceId,
    feed: Feed,
    inflight: HashSet<(PostId, ReactionKind)>,
}

impl FeedSession {
    /// Create a session for one device
    pub fn new(client: ApiClient, device_id: DeviceId) -> Self {
        Self {
            client,
            device_id,
            feed: Feed::new(),
            inflight: HashSet::new(),
        }
    }

    /// The current reconciled feed
    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// The device identity this session acts as
    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    /// Replace the feed with a fresh fetch
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let payloads = self.client.list_posts(&self.device_id).await?;
        let entries = payloads
            .into_iter()
            .map(PostPayload::into_entry)
            .collect::<Result<Vec<FeedEntry>, _>>()?;
        self.feed.set_all(entries);
        Ok(())
    }

    /// Submit a post optimistically.
    ///
    /// The pending entry appears before the network call starts; on success
    /// it is replaced in place by the authoritative record (whose id then
    /// deduplicates the change-feed push of the same row), on failure it is
    /// rolled back and the server's reason is returned.
    pub async fn submit(&mut self, raw: &str) -> Result<EntryId, ClientError> {
        if !submission_precheck(raw) {
            return Err(ClientError::Precheck);
        }

        let trimmed = raw.trim();
        let pending_id = self.feed.push_pending(trimmed);

        match self.client.create_post(trimmed).await {
            Ok(payload) => {
                let entry = payload.into_entry()?;
                let confirmed_id = entry.id.clone();
                if !self.feed.replace(&pending_id, entry.clone()) {
                    // The change feed beat us to it; merge keeps one row
                    self.feed.merge(entry);
                }
                debug!(id = %confirmed_id, "Submission confirmed");
                Ok(confirmed_id)
            }
            Err(err) => {
                self.feed.remove(&pending_id);
                warn!(error = %err, "Submission failed, pending entry rolled back");
                Err(err)
            }
        }
    }

    /// Toggle a reaction optimistically.
    ///
    /// Returns `Ok(false)` when the click was ignored: a call for the same
    /// (post, kind) is already in flight, the post is unknown, or the row
    /// is still pending (not yet reaction-capable).
    pub async fn toggle(&mut self, post_id: PostId, kind: ReactionKind) -> Result<bool, ClientError> {
        let id = EntryId::Confirmed(post_id);
        let Some(entry) = self.feed.get(&id) else {
            return Ok(false);
        };

        if !self.inflight.insert((post_id, kind)) {
            debug!(post_id = %post_id, "Toggle already in flight, click ignored");
            return Ok(false);
        }

        // Snapshot for rollback, then flip locally before the call
        let prior = ReactionDelta {
            kind,
            count: entry.count(kind),
            active: entry.active(kind),
        };
        let optimistic = ReactionDelta {
            kind,
            count: if prior.active { prior.count - 1 } else { prior.count + 1 },
            active: !prior.active,
        };
        self.feed.apply_delta(post_id, optimistic);

        let result = self.client.toggle_reaction(post_id, &self.device_id, kind).await;
        self.inflight.remove(&(post_id, kind));

        match result {
            Ok(payload) => {
                let authoritative = ReactionDelta {
                    kind,
                    count: match kind {
                        ReactionKind::Support => payload.counts.support_count,
                        ReactionKind::Relate => payload.counts.relate_count,
                    },
                    active: payload.action == "added",
                };
                self.feed.apply_delta(post_id, authoritative);
                Ok(true)
            }
            Err(err) => {
                self.feed.apply_delta(post_id, prior);
                warn!(error = %err, post_id = %post_id, "Toggle failed, rolled back");
                Err(err)
            }
        }
    }

    /// Feed a gateway event into the reconciler.
    ///
    /// Tolerates events for posts already displayed (including our own
    /// optimistic inserts) and unknown event types.
    pub fn handle_event(&mut self, event_type: &str, data: Value) {
        match event_type {
            "POST_CREATE" => {
                match serde_json::from_value::<PostPayload>(data) {
                    Ok(payload) => match payload.into_entry() {
                        Ok(entry) => self.feed.merge(entry),
                        Err(err) => warn!(error = %err, "Ignoring malformed POST_CREATE"),
                    },
                    Err(err) => warn!(error = %err, "Ignoring malformed POST_CREATE"),
                }
            }
            "REACTION_UPDATE" => {
                let post_id = data
                    .get("post_id")
                    .and_then(Value::as_str)
                    .and_then(|raw| raw.parse::<PostId>().ok());
                let support = data.get("support_count").and_then(Value::as_i64);
                let relate = data.get("relate_count").and_then(Value::as_i64);

                if let (Some(post_id), Some(support_count), Some(relate_count)) =
                    (post_id, support, relate)
                {
                    self.feed.apply_counts(
                        post_id,
                        ReactionTally {
                            support_count,
                            relate_count,
                        },
                    );
                } else {
                    warn!("Ignoring malformed REACTION_UPDATE");
                }
            }
            other => debug!(event_type = other, "Ignoring unknown feed event"),
        }
    }
}
