//! Reaction database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the reactions table
#[derive(Debug, Clone, FromRow)]
pub struct ReactionModel {
    pub post_id: Uuid,
    pub device_id: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// Per-kind count for a single post (from a GROUP BY query)
#[derive(Debug, Clone, FromRow)]
pub struct KindCountModel {
    pub kind: String,
    pub count: i64,
}

/// Per-kind count keyed by post (bulk feed tallies)
#[derive(Debug, Clone, FromRow)]
pub struct PostKindCountModel {
    pub post_id: Uuid,
    pub kind: String,
    pub count: i64,
}

/// A (post, kind) pair for a single device (bulk actor flags)
#[derive(Debug, Clone, FromRow)]
pub struct PostKindModel {
    pub post_id: Uuid,
    pub kind: String,
}
