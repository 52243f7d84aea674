//! Post handlers
//!
//! Submission and feed listing endpoints.

use axum::{
    extract::{Query, State},
    Json,
};
use murmur_core::value_objects::DeviceId;
use murmur_service::{
    CreatePostRequest, CreatePostResponse, ListPostsQuery, PostListResponse, PostService,
};

use crate::extractors::{ClientIp, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Submit a post
///
/// POST /api/v1/posts
pub async fn create_post(
    State(state): State<AppState>,
    ClientIp(origin): ClientIp,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<CreatePostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(&origin, request).await?;
    Ok(Created(Json(CreatePostResponse { post })))
}

/// List the feed, newest first
///
/// GET /api/v1/posts?deviceId=...
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> ApiResult<Json<PostListResponse>> {
    let device_id = query
        .device_id
        .filter(|token| !token.is_empty())
        .map(DeviceId::new);

    let service = PostService::new(state.service_context());
    let posts = service.list_posts(device_id).await?;
    Ok(Json(PostListResponse { posts }))
}
