//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::entities::{ActorReactions, Post, Reaction, ReactionKind, ReactionTally};
use crate::error::DomainError;
use crate::value_objects::{DeviceId, PostId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;

    /// List the most recent posts, newest first, capped at `limit`
    async fn list_recent(&self, limit: i64) -> RepoResult<Vec<Post>>;

    /// Persist a new post. Posts are append-only: no update or delete exists.
    async fn create(&self, post: &Post) -> RepoResult<()>;
}

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Find the reaction record for an exact `(post, device, kind)` identity
    async fn find(
        &self,
        post_id: PostId,
        device_id: &DeviceId,
        kind: ReactionKind,
    ) -> RepoResult<Option<Reaction>>;

    /// All reaction records on a post, oldest first
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Reaction>>;

    /// Insert a reaction record.
    ///
    /// The backing store enforces uniqueness on `(post_id, device_id, kind)`;
    /// a violation means a concurrent insert of the same identity won the
    /// race and must surface as `DomainError::ReactionAlreadyExists`, not as
    /// a storage failure.
    async fn create(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Delete the record for an identity if present.
    ///
    /// Returns whether a record existed; deleting an absent record is a
    /// successful no-op.
    async fn delete(
        &self,
        post_id: PostId,
        device_id: &DeviceId,
        kind: ReactionKind,
    ) -> RepoResult<bool>;

    /// Current counts of both kinds for one post, computed from live records
    async fn tally(&self, post_id: PostId) -> RepoResult<ReactionTally>;

    /// Counts for many posts at once (feed assembly). Posts with no
    /// reactions may be absent from the map.
    async fn tally_many(&self, post_ids: &[PostId]) -> RepoResult<HashMap<PostId, ReactionTally>>;

    /// Which kinds one device has active on one post
    async fn actor_flags(
        &self,
        post_id: PostId,
        device_id: &DeviceId,
    ) -> RepoResult<ActorReactions>;

    /// Per-actor flags for many posts at once (feed assembly with a device
    /// id). Posts the device never reacted to may be absent from the map.
    async fn actor_flags_many(
        &self,
        post_ids: &[PostId],
        device_id: &DeviceId,
    ) -> RepoResult<HashMap<PostId, ActorReactions>>;
}
