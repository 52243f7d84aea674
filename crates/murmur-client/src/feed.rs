//! The optimistic feed reconciler.
//!
//! One ordered-by-recency list fed by three sources: fetch results,
//! change-feed events, and locally synthesized pending entries. Everything
//! funnels through [`Feed::merge`], which is commutative with respect to
//! the arrival order of a pending entry and its confirmed counterpart, so
//! interleaving never produces duplicate rows.

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

use murmur_core::entities::{ReactionKind, ReactionTally};
use murmur_core::value_objects::PostId;

/// Reserved prefix marking locally synthesized identifiers
pub const PENDING_PREFIX: &str = "temp-";

/// The displayed feed never exceeds this many rows
pub const MAX_ENTRIES: usize = 200;

/// Advisory character ceiling for the submission pre-check
pub const MAX_CHARS: usize = 5000;

/// Feed entry identifier: either a local sentinel-prefixed token for a
/// pending entry, or the authoritative server id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryId {
    /// Locally synthesized, not yet confirmed
    Pending(String),
    /// Server-assigned
    Confirmed(PostId),
}

impl EntryId {
    /// Mint a fresh pending id
    pub fn new_pending() -> Self {
        Self::Pending(Uuid::new_v4().to_string())
    }

    /// Whether this id is a local sentinel
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending(nonce) => write!(f, "{PENDING_PREFIX}{nonce}"),
            Self::Confirmed(id) => write!(f, "{id}"),
        }
    }
}

/// One displayed feed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub id: EntryId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub support_count: i64,
    pub relate_count: i64,
    pub user_support: bool,
    pub user_relate: bool,
}

impl FeedEntry {
    /// Synthesize a pending entry for a submission in flight: client
    /// timestamp, zero counts, no active reactions.
    pub fn pending(content: impl Into<String>) -> Self {
        Self {
            id: EntryId::new_pending(),
            content: content.into(),
            created_at: Utc::now(),
            support_count: 0,
            relate_count: 0,
            user_support: false,
            user_relate: false,
        }
    }

    /// Build a confirmed entry from authoritative server fields
    pub fn confirmed(
        post_id: PostId,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
        tally: ReactionTally,
        user_support: bool,
        user_relate: bool,
    ) -> Self {
        Self {
            id: EntryId::Confirmed(post_id),
            content: content.into(),
            created_at,
            support_count: tally.support_count,
            relate_count: tally.relate_count,
            user_support,
            user_relate,
        }
    }

    /// Pending entries are not reaction-capable
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.id.is_pending()
    }

    /// Current count for one kind
    #[must_use]
    pub fn count(&self, kind: ReactionKind) -> i64 {
        match kind {
            ReactionKind::Support => self.support_count,
            ReactionKind::Relate => self.relate_count,
        }
    }

    /// Current own-reaction flag for one kind
    #[must_use]
    pub fn active(&self, kind: ReactionKind) -> bool {
        match kind {
            ReactionKind::Support => self.user_support,
            ReactionKind::Relate => self.user_relate,
        }
    }

    fn apply(&mut self, delta: ReactionDelta) {
        match delta.kind {
            ReactionKind::Support => {
                self.support_count = delta.count;
                self.user_support = delta.active;
            }
            ReactionKind::Relate => {
                self.relate_count = delta.count;
                self.user_relate = delta.active;
            }
        }
    }
}

/// Explicit tagged reaction update: which kind, the new count, and whether
/// this device's reaction is now active.
#[derive(Debug, Clone, Copy)]
pub struct ReactionDelta {
    pub kind: ReactionKind,
    pub count: i64,
    pub active: bool,
}

/// Advisory submission pre-check: 1-200 words and at most `MAX_CHARS` raw
/// characters. Exists to disable a submit control early; the authoritative
/// check is server-side and the two may disagree.
#[must_use]
pub fn submission_precheck(raw: &str) -> bool {
    let words = raw.split_whitespace().count();
    (1..=200).contains(&words) && raw.chars().count() <= MAX_CHARS
}

/// The reconciled feed: pure state, no I/O
#[derive(Debug, Default)]
pub struct Feed {
    entries: Vec<FeedEntry>,
}

impl Feed {
    /// Empty feed
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current rows, newest first
    #[must_use]
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is displayed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a row by id
    #[must_use]
    pub fn get(&self, id: &EntryId) -> Option<&FeedEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Replace the whole list with a fetch result (authoritative), capped
    pub fn set_all(&mut self, entries: Vec<FeedEntry>) {
        self.entries = entries;
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Synthesize and prepend a pending entry, returning its id
    pub fn push_pending(&mut self, content: impl Into<String>) -> EntryId {
        let entry = FeedEntry::pending(content);
        let id = entry.id.clone();
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_ENTRIES);
        id
    }

    /// Merge an incoming entry from a fetch or change-feed event.
    ///
    /// Matches an existing row by identifier, or by content equality - the
    /// content match is what collapses a pending entry (whose id is a local
    /// sentinel) with the confirmed row for the same submission. A match is
    /// replaced in place, keeping its position; otherwise the entry is
    /// prepended. Either way the list is re-capped.
    ///
    /// Known limit, inherited deliberately: two distinct posts with
    /// identical content inside the same window collapse into one row. A
    /// client-generated correlation id threaded through the submission
    /// would fix it, but the wire contract has no field for one.
    pub fn merge(&mut self, incoming: FeedEntry) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.id == incoming.id || entry.content == incoming.content)
        {
            Some(existing) => *existing = incoming,
            None => self.entries.insert(0, incoming),
        }
        self.entries.truncate(MAX_ENTRIES);
    }

    /// Replace the row with `id` in place, preserving its position.
    ///
    /// Used when the caller knows exactly which row a server record
    /// confirms (the submission response), sidestepping the content match.
    pub fn replace(&mut self, id: &EntryId, replacement: FeedEntry) -> bool {
        match self.entries.iter_mut().find(|entry| &entry.id == id) {
            Some(existing) => {
                *existing = replacement;
                true
            }
            None => false,
        }
    }

    /// Drop a row (rollback of a failed optimistic insert)
    pub fn remove(&mut self, id: &EntryId) -> Option<FeedEntry> {
        let index = self.entries.iter().position(|entry| &entry.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Apply a tagged reaction update to one confirmed row, in place.
    ///
    /// Never touches any other row and never re-sorts - a single-post
    /// update must not resync the list.
    pub fn apply_delta(&mut self, post_id: PostId, delta: ReactionDelta) -> bool {
        let id = EntryId::Confirmed(post_id);
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.apply(delta);
                true
            }
            None => false,
        }
    }

    /// Apply externally observed counts (a change-feed reaction event) to
    /// one row. Counts only: another device's toggle says nothing about
    /// this device's own flags.
    pub fn apply_counts(&mut self, post_id: PostId, tally: ReactionTally) -> bool {
        let id = EntryId::Confirmed(post_id);
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.support_count = tally.support_count;
                entry.relate_count = tally.relate_count;
                true
            }
            None => false,
        }
    }
}
