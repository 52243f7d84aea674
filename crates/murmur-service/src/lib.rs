//! # murmur-service
//!
//! Application layer: the submission pipeline, the reaction toggle engine,
//! the injected rate limiter, and the DTOs the API serves.

pub mod dto;
pub mod rate_limit;
pub mod services;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use dto::{
    CreatePostRequest, CreatePostResponse, HealthChecks, HealthResponse, ListPostsQuery,
    PostListResponse, PostResponse, ReactionAction, ReactionRecordResponse, ReactionRequest,
    ReactionStateQuery, ReactionStateResponse, ReadinessResponse, RemoveReactionResponse,
    ToggleReactionResponse,
};
pub use rate_limit::{RateLimitDecision, RateLimiter};
pub use services::{
    PostService, ReactionService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, FEED_LIMIT,
};
