//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs

pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{CreatePostRequest, ListPostsQuery, ReactionRequest, ReactionStateQuery};

// Re-export commonly used response types
pub use responses::{
    CreatePostResponse, HealthChecks, HealthResponse, PostListResponse, PostResponse,
    ReactionAction, ReactionRecordResponse, ReactionStateResponse, ReadinessResponse,
    RemoveReactionResponse, ToggleReactionResponse,
};
