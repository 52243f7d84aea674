//! Wire-shape mirror types and data builders for integration tests

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post row as the API serializes it
#[derive(Debug, Clone, Deserialize)]
pub struct PostFixture {
    pub id: String,
    pub content: String,
    pub support_count: i64,
    pub relate_count: i64,
    #[serde(default)]
    pub user_support: Option<bool>,
    #[serde(default)]
    pub user_relate: Option<bool>,
}

/// Envelope of POST /api/v1/posts
#[derive(Debug, Deserialize)]
pub struct CreatePostFixture {
    pub post: PostFixture,
}

/// Envelope of GET /api/v1/posts
#[derive(Debug, Deserialize)]
pub struct PostListFixture {
    pub posts: Vec<PostFixture>,
}

/// Counts sub-object
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CountsFixture {
    pub support_count: i64,
    pub relate_count: i64,
}

/// Response of POST /api/v1/reactions
#[derive(Debug, Deserialize)]
pub struct ToggleFixture {
    pub success: bool,
    pub action: String,
    pub reaction_type: String,
    pub counts: CountsFixture,
}

/// Response of DELETE /api/v1/reactions
#[derive(Debug, Deserialize)]
pub struct RemoveFixture {
    pub success: bool,
}

/// Per-device flags sub-object
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UserReactionsFixture {
    pub support: bool,
    pub relate: bool,
}

/// Response of GET /api/v1/reactions
#[derive(Debug, Deserialize)]
pub struct ReactionStateFixture {
    pub success: bool,
    pub data: Vec<serde_json::Value>,
    pub counts: CountsFixture,
    #[serde(rename = "userReactions")]
    pub user_reactions: UserReactionsFixture,
}

/// Error body shape
#[derive(Debug, Deserialize)]
pub struct ErrorFixture {
    pub error: String,
    pub code: String,
}

/// Request body for submissions
#[derive(Debug, Serialize)]
pub struct CreatePostBody {
    pub content: String,
}

/// Request body for reaction toggle/remove
#[derive(Debug, Serialize)]
pub struct ReactionBody {
    pub post_id: String,
    pub reaction_type: String,
    pub device_id: String,
}

/// Unique content so runs against a shared database do not collide
pub fn unique_content(tag: &str) -> String {
    format!("{tag} {}", Uuid::new_v4())
}

/// Fresh device id for a test actor
pub fn unique_device() -> String {
    Uuid::new_v4().to_string()
}

/// Fresh forwarded-for origin so each test gets its own rate-limit window
pub fn unique_origin() -> String {
    let tail = Uuid::new_v4().as_u128() % 250 + 1;
    format!("203.0.113.{tail}")
}
