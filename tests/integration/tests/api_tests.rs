//! API integration tests
//!
//! These tests require:
//! - A running PostgreSQL instance with the murmur-db migrations applied
//! - A running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Submission Tests
// ============================================================================

#[tokio::test]
async fn test_submit_then_list() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let content = unique_content("this is fine");

    let response = server
        .post_from(
            "/api/v1/posts",
            &unique_origin(),
            &CreatePostBody { content: content.clone() },
        )
        .await
        .unwrap();
    let created: CreatePostFixture = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.post.content, content);
    assert_eq!(created.post.support_count, 0);
    assert_eq!(created.post.relate_count, 0);
    assert!(!created.post.id.starts_with("temp-"));

    let response = server.get("/api/v1/posts").await.unwrap();
    let listing: PostListFixture = assert_json(response, StatusCode::OK).await.unwrap();

    let row = listing
        .posts
        .iter()
        .find(|post| post.id == created.post.id)
        .expect("created post should appear in the feed");
    assert_eq!(row.support_count, 0);
    assert_eq!(row.relate_count, 0);
    assert!(row.user_support.is_none(), "no device id, no actor flags");
}

#[tokio::test]
async fn test_submission_strips_markup() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let tag = unique_content("markup");

    let response = server
        .post_from(
            "/api/v1/posts",
            &unique_origin(),
            &CreatePostBody {
                content: format!("<b>{tag}</b>"),
            },
        )
        .await
        .unwrap();
    let created: CreatePostFixture = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(created.post.content, tag);
}

#[tokio::test]
async fn test_empty_content_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_from(
            "/api/v1/posts",
            &unique_origin(),
            &CreatePostBody { content: "   ".to_string() },
        )
        .await
        .unwrap();
    let error: ErrorFixture = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error, "Content cannot be empty");
}

#[tokio::test]
async fn test_denylisted_content_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post_from(
            "/api/v1/posts",
            &unique_origin(),
            &CreatePostBody {
                content: "buy now before it is gone".to_string(),
            },
        )
        .await
        .unwrap();
    let error: ErrorFixture = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error, "Content appears to be spam");
}

#[tokio::test]
async fn test_rate_limit_denies_sixth_submission() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let origin = unique_origin();

    for n in 0..5 {
        let response = server
            .post_from(
                "/api/v1/posts",
                &origin,
                &CreatePostBody { content: unique_content(&format!("window {n}")) },
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .post_from(
            "/api/v1/posts",
            &origin,
            &CreatePostBody { content: unique_content("one too many") },
        )
        .await
        .unwrap();
    let error: ErrorFixture = assert_json(response, StatusCode::TOO_MANY_REQUESTS).await.unwrap();
    assert_eq!(error.code, "RATE_LIMIT_EXCEEDED");

    // A different origin is still admitted
    let response = server
        .post_from(
            "/api/v1/posts",
            &unique_origin(),
            &CreatePostBody { content: unique_content("fresh origin") },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

async fn submit_post(server: &TestServer, tag: &str) -> PostFixture {
    let response = server
        .post_from(
            "/api/v1/posts",
            &unique_origin(),
            &CreatePostBody { content: unique_content(tag) },
        )
        .await
        .unwrap();
    let created: CreatePostFixture = assert_json(response, StatusCode::CREATED).await.unwrap();
    created.post
}

#[tokio::test]
async fn test_toggle_cycle_added_then_removed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = submit_post(&server, "toggle cycle").await;
    let device = unique_device();
    let body = ReactionBody {
        post_id: post.id.clone(),
        reaction_type: "support".to_string(),
        device_id: device.clone(),
    };

    let response = server.post("/api/v1/reactions", &body).await.unwrap();
    let first: ToggleFixture = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(first.success);
    assert_eq!(first.action, "added");
    assert_eq!(first.reaction_type, "support");
    assert_eq!(first.counts.support_count, 1);
    assert_eq!(first.counts.relate_count, 0);

    let response = server.post("/api/v1/reactions", &body).await.unwrap();
    let second: ToggleFixture = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second.action, "removed");
    assert_eq!(second.counts.support_count, 0);
}

#[tokio::test]
async fn test_toggle_reflects_in_state_read() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = submit_post(&server, "state read").await;
    let device = unique_device();
    let body = ReactionBody {
        post_id: post.id.clone(),
        reaction_type: "relate".to_string(),
        device_id: device.clone(),
    };

    server.post("/api/v1/reactions", &body).await.unwrap();

    let response = server
        .get(&format!("/api/v1/reactions?post_id={}&device_id={}", post.id, device))
        .await
        .unwrap();
    let state: ReactionStateFixture = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(state.success);
    assert_eq!(state.counts.relate_count, 1);
    assert!(state.user_reactions.relate);
    assert!(!state.user_reactions.support);
    assert_eq!(state.data.len(), 1);

    // After the paired removal the flag clears
    server.post("/api/v1/reactions", &body).await.unwrap();
    let response = server
        .get(&format!("/api/v1/reactions?post_id={}&device_id={}", post.id, device))
        .await
        .unwrap();
    let state: ReactionStateFixture = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!state.user_reactions.relate);
    assert_eq!(state.counts.relate_count, 0);
}

#[tokio::test]
async fn test_counts_track_distinct_actors() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = submit_post(&server, "many actors").await;

    for _ in 0..3 {
        let body = ReactionBody {
            post_id: post.id.clone(),
            reaction_type: "support".to_string(),
            device_id: unique_device(),
        };
        let response = server.post("/api/v1/reactions", &body).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let body = ReactionBody {
        post_id: post.id.clone(),
        reaction_type: "support".to_string(),
        device_id: unique_device(),
    };
    let response = server.post("/api/v1/reactions", &body).await.unwrap();
    let fourth: ToggleFixture = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fourth.counts.support_count, 4);
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = submit_post(&server, "idempotent remove").await;
    let body = ReactionBody {
        post_id: post.id.clone(),
        reaction_type: "support".to_string(),
        device_id: unique_device(),
    };

    // Nothing to remove yet: still a success
    let response = server.delete("/api/v1/reactions", &body).await.unwrap();
    let removed: RemoveFixture = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(removed.success);

    // Add, remove, remove again
    server.post("/api/v1/reactions", &body).await.unwrap();
    let response = server.delete("/api/v1/reactions", &body).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server.delete("/api/v1/reactions", &body).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/api/v1/reactions?post_id={}", post.id))
        .await
        .unwrap();
    let state: ReactionStateFixture = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(state.counts.support_count, 0);
}

#[tokio::test]
async fn test_invalid_reaction_type_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = submit_post(&server, "bad kind").await;
    let body = ReactionBody {
        post_id: post.id,
        reaction_type: "upvote".to_string(),
        device_id: unique_device(),
    };

    let response = server.post("/api/v1/reactions", &body).await.unwrap();
    let error: ErrorFixture = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(error.error.contains("support"), "reason names the valid kinds: {}", error.error);
}

#[tokio::test]
async fn test_toggle_unknown_post_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let body = ReactionBody {
        post_id: uuid::Uuid::new_v4().to_string(),
        reaction_type: "support".to_string(),
        device_id: unique_device(),
    };

    let response = server.post("/api/v1/reactions", &body).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_listing_with_device_id_carries_actor_flags() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let post = submit_post(&server, "actor flags").await;
    let device = unique_device();

    let body = ReactionBody {
        post_id: post.id.clone(),
        reaction_type: "support".to_string(),
        device_id: device.clone(),
    };
    server.post("/api/v1/reactions", &body).await.unwrap();

    let response = server
        .get(&format!("/api/v1/posts?deviceId={device}"))
        .await
        .unwrap();
    let listing: PostListFixture = assert_json(response, StatusCode::OK).await.unwrap();

    let row = listing.posts.iter().find(|p| p.id == post.id).unwrap();
    assert_eq!(row.support_count, 1);
    assert_eq!(row.user_support, Some(true));
    assert_eq!(row.user_relate, Some(false));
}
