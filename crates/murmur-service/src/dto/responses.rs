//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Ids are
//! serialized as strings. The `user_support`/`user_relate` fields only
//! appear when a device id accompanied the request.

use chrono::{DateTime, Utc};
use serde::Serialize;

use murmur_core::entities::{ActorReactions, Post, Reaction, ReactionKind, ReactionTally};

// ============================================================================
// Post Responses
// ============================================================================

/// A feed row: the post plus its derived reaction state
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub support_count: i64,
    pub relate_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_support: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_relate: Option<bool>,
}

impl PostResponse {
    /// Response for a freshly created post: zero counts, no actor flags
    pub fn from_new(post: Post) -> Self {
        Self::from_parts(post, ReactionTally::default(), None)
    }

    /// Assemble a feed row from its pieces
    pub fn from_parts(post: Post, tally: ReactionTally, actor: Option<ActorReactions>) -> Self {
        Self {
            id: post.id.to_string(),
            content: post.content,
            created_at: post.created_at,
            support_count: tally.support_count,
            relate_count: tally.relate_count,
            user_support: actor.map(|a| a.support),
            user_relate: actor.map(|a| a.relate),
        }
    }
}

/// Envelope for a successful submission (201)
#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub post: PostResponse,
}

/// Envelope for the feed listing
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// What a toggle did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionAction {
    Added,
    Removed,
}

/// Response to a toggle: the action taken plus both counts, recomputed
/// together so the payload is self-consistent
#[derive(Debug, Serialize)]
pub struct ToggleReactionResponse {
    pub success: bool,
    pub action: ReactionAction,
    pub reaction_type: ReactionKind,
    pub counts: ReactionTally,
}

/// Response to an explicit removal (idempotent)
#[derive(Debug, Serialize)]
pub struct RemoveReactionResponse {
    pub success: bool,
}

/// One raw reaction record, as exposed by the state read
#[derive(Debug, Clone, Serialize)]
pub struct ReactionRecordResponse {
    pub reaction_type: ReactionKind,
    pub device_id: String,
}

impl From<&Reaction> for ReactionRecordResponse {
    fn from(reaction: &Reaction) -> Self {
        Self {
            reaction_type: reaction.kind,
            device_id: reaction.device_id.to_string(),
        }
    }
}

/// Full reaction state for one post
#[derive(Debug, Serialize)]
pub struct ReactionStateResponse {
    pub success: bool,
    pub data: Vec<ReactionRecordResponse>,
    pub counts: ReactionTally,
    #[serde(rename = "userReactions")]
    pub user_reactions: ActorReactions,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { status: "ok" }
    }
}

/// Per-dependency health flags
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
    pub redis: bool,
}

/// Readiness probe response
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
}

impl ReadinessResponse {
    #[must_use]
    pub fn ready(database: bool, redis: bool) -> Self {
        Self {
            status: if database && redis { "ready" } else { "degraded" },
            checks: HealthChecks { database, redis },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_core::value_objects::PostId;

    #[test]
    fn test_actor_fields_absent_without_device_id() {
        let post = Post::new(PostId::generate(), "quiet".to_string());
        let response = PostResponse::from_parts(post, ReactionTally::default(), None);
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("user_support").is_none());
        assert!(json.get("user_relate").is_none());
        assert_eq!(json["support_count"], 0);
    }

    #[test]
    fn test_actor_fields_present_with_device_id() {
        let post = Post::new(PostId::generate(), "quiet".to_string());
        let actor = ActorReactions {
            support: true,
            relate: false,
        };
        let response = PostResponse::from_parts(post, ReactionTally::default(), Some(actor));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["user_support"], true);
        assert_eq!(json["user_relate"], false);
    }

    #[test]
    fn test_action_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ReactionAction::Added).unwrap(), "\"added\"");
        assert_eq!(serde_json::to_string(&ReactionAction::Removed).unwrap(), "\"removed\"");
    }

    #[test]
    fn test_readiness_status() {
        let ok = ReadinessResponse::ready(true, true);
        assert_eq!(ok.status, "ready");

        let degraded = ReadinessResponse::ready(true, false);
        assert_eq!(degraded.status, "degraded");
    }
}
