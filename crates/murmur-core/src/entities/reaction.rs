//! Reaction entity - a device's sentiment tag on a post
//!
//! The triple `(post_id, device_id, kind)` is the identity of a reaction:
//! presence of the record means active, absence means inactive. Toggling is
//! delete-or-insert, never an in-place flip, so uniqueness is enforced by
//! record presence at the storage boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{DeviceId, PostId};

/// The two sentiment tags a device can place on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Support,
    Relate,
}

impl ReactionKind {
    /// All kinds, in tally order
    pub const ALL: [ReactionKind; 2] = [ReactionKind::Support, ReactionKind::Relate];

    /// Wire name of the kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::Relate => "relate",
        }
    }

    /// Parse a wire name; `None` for anything else
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "support" => Some(Self::Support),
            "relate" => Some(Self::Relate),
            _ => None,
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub post_id: PostId,
    pub device_id: DeviceId,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction stamped now
    pub fn new(post_id: PostId, device_id: DeviceId, kind: ReactionKind) -> Self {
        Self {
            post_id,
            device_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Aggregate reaction counts for one post.
///
/// Always derived by counting live records, never maintained as an
/// independent counter, so it cannot drift from the record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionTally {
    pub support_count: i64,
    pub relate_count: i64,
}

impl ReactionTally {
    /// Count for one kind
    #[must_use]
    pub const fn count(&self, kind: ReactionKind) -> i64 {
        match kind {
            ReactionKind::Support => self.support_count,
            ReactionKind::Relate => self.relate_count,
        }
    }

    /// Set the count for one kind
    pub fn set(&mut self, kind: ReactionKind, count: i64) {
        match kind {
            ReactionKind::Support => self.support_count = count,
            ReactionKind::Relate => self.relate_count = count,
        }
    }
}

/// Which kinds a single device currently has active on a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorReactions {
    pub support: bool,
    pub relate: bool,
}

impl ActorReactions {
    /// Flag for one kind
    #[must_use]
    pub const fn has(&self, kind: ReactionKind) -> bool {
        match kind {
            ReactionKind::Support => self.support,
            ReactionKind::Relate => self.relate,
        }
    }

    /// Set the flag for one kind
    pub fn set(&mut self, kind: ReactionKind, active: bool) {
        match kind {
            ReactionKind::Support => self.support = active,
            ReactionKind::Relate => self.relate = active,
        }
    }
}
