//! Post service
//!
//! The submission pipeline and the feed listing.

use murmur_core::entities::Post;
use murmur_core::value_objects::{DeviceId, PostId};
use murmur_core::{validate_content, DomainError};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::dto::{CreatePostRequest, PostResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Feed window: the listing never returns more than this many rows
pub const FEED_LIMIT: i64 = 200;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new post.
    ///
    /// Order matters: the rate limiter gates the attempt before any
    /// validation work, and nothing is written unless validation accepts.
    #[instrument(skip(self, request, origin_key), fields(origin = %origin_key))]
    pub async fn create_post(
        &self,
        origin_key: &str,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        if !self.ctx.rate_limiter().try_acquire(origin_key).is_allowed() {
            warn!("Submission rate limit hit");
            return Err(ServiceError::rate_limited());
        }

        let normalized = validate_content(&request.content).map_err(DomainError::from)?;

        let post = Post::new(PostId::generate(), normalized);
        self.ctx.post_repo().create(&post).await?;

        info!(post_id = %post.id, "Post created");

        // Change-feed notification; delivery is best-effort
        self.ctx
            .publisher()
            .publish_post_create(json!({
                "id": post.id.to_string(),
                "content": post.content,
                "created_at": post.created_at,
                "support_count": 0,
                "relate_count": 0,
            }))
            .await
            .ok();

        Ok(PostResponse::from_new(post))
    }

    /// List the feed: newest first, capped at `FEED_LIMIT`.
    ///
    /// Counts are always included; per-actor flags only when a device id
    /// was supplied.
    #[instrument(skip(self))]
    pub async fn list_posts(&self, device_id: Option<DeviceId>) -> ServiceResult<Vec<PostResponse>> {
        let posts = self.ctx.post_repo().list_recent(FEED_LIMIT).await?;
        let ids: Vec<PostId> = posts.iter().map(|post| post.id).collect();

        let tallies = self.ctx.reaction_repo().tally_many(&ids).await?;
        let actor_flags = match &device_id {
            Some(device) => Some(self.ctx.reaction_repo().actor_flags_many(&ids, device).await?),
            None => None,
        };

        Ok(posts
            .into_iter()
            .map(|post| {
                let tally = tallies.get(&post.id).copied().unwrap_or_default();
                let actor = actor_flags
                    .as_ref()
                    .map(|flags| flags.get(&post.id).copied().unwrap_or_default());
                PostResponse::from_parts(post, tally, actor)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_context;
    use murmur_core::entities::{Reaction, ReactionKind};
    use murmur_core::ContentRejection;

    #[tokio::test]
    async fn test_create_post_normalizes_content() {
        let ctx = test_context();
        let service = PostService::new(&ctx);

        let response = service
            .create_post(
                "10.0.0.1",
                CreatePostRequest {
                    content: "  <b>i hum</b> in elevators  ".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.content, "i hum in elevators");
        assert_eq!(response.support_count, 0);
        assert_eq!(response.relate_count, 0);
        assert!(response.user_support.is_none());
    }

    #[tokio::test]
    async fn test_create_post_rejects_denylisted_content() {
        let ctx = test_context();
        let service = PostService::new(&ctx);

        let err = service
            .create_post(
                "10.0.0.1",
                CreatePostRequest {
                    content: "click here for riches".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::ContentRejected(ContentRejection::Spam))
        ));
    }

    #[tokio::test]
    async fn test_rejected_submission_writes_nothing() {
        let ctx = test_context();
        let service = PostService::new(&ctx);

        service
            .create_post("10.0.0.1", CreatePostRequest { content: "  ".to_string() })
            .await
            .unwrap_err();

        assert!(service.list_posts(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rate_limit_gates_submissions_per_origin() {
        let ctx = test_context();
        let service = PostService::new(&ctx);

        for i in 0..5 {
            service
                .create_post(
                    "10.0.0.9",
                    CreatePostRequest { content: format!("post number {i}") },
                )
                .await
                .unwrap();
        }

        let err = service
            .create_post(
                "10.0.0.9",
                CreatePostRequest { content: "one too many".to_string() },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 429);

        // A different origin is unaffected
        service
            .create_post(
                "10.0.0.10",
                CreatePostRequest { content: "different origin".to_string() },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_posts_is_newest_first_with_counts() {
        let ctx = test_context();
        let service = PostService::new(&ctx);

        let first = service
            .create_post("10.0.0.1", CreatePostRequest { content: "older".to_string() })
            .await
            .unwrap();
        let second = service
            .create_post("10.0.0.2", CreatePostRequest { content: "newer".to_string() })
            .await
            .unwrap();

        let device = DeviceId::new("device-1");
        ctx.reaction_repo()
            .create(&Reaction::new(
                first.id.parse().unwrap(),
                device.clone(),
                ReactionKind::Support,
            ))
            .await
            .unwrap();

        let listed = service.list_posts(Some(device)).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
        assert_eq!(listed[1].support_count, 1);
        assert_eq!(listed[1].user_support, Some(true));
        assert_eq!(listed[0].user_support, Some(false));
    }
}
