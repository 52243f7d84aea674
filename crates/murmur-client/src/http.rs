//! HTTP client for the board API.
//!
//! Thin reqwest wrapper over the REST surface. Non-success responses are
//! turned into `ClientError::Api` carrying the server's reason string, so
//! callers can roll optimistic state back and surface the message.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use murmur_core::entities::{ReactionKind, ReactionTally};
use murmur_core::value_objects::{DeviceId, PostId};

use crate::feed::FeedEntry;

/// Client-side error taxonomy
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never completed (connection, timeout, decode)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with an error status and reason
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Local persistence failed (device identity store)
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The advisory pre-check refused the submission before any I/O
    #[error("submission failed the pre-check")]
    Precheck,

    /// The server answered 2xx with a shape we cannot use
    #[error("unexpected response: {0}")]
    Protocol(String),
}

/// Error body shape shared by all endpoints
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    error: Option<String>,
}

/// A post as the API serializes it
#[derive(Debug, Clone, Deserialize)]
pub struct PostPayload {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub support_count: i64,
    #[serde(default)]
    pub relate_count: i64,
    #[serde(default)]
    pub user_support: Option<bool>,
    #[serde(default)]
    pub user_relate: Option<bool>,
}

impl PostPayload {
    /// Convert into a confirmed feed entry
    pub fn into_entry(self) -> Result<FeedEntry, ClientError> {
        let post_id: PostId = self
            .id
            .parse()
            .map_err(|_| ClientError::Protocol(format!("bad post id: {}", self.id)))?;

        Ok(FeedEntry::confirmed(
            post_id,
            self.content,
            self.created_at,
            ReactionTally {
                support_count: self.support_count,
                relate_count: self.relate_count,
            },
            self.user_support.unwrap_or(false),
            self.user_relate.unwrap_or(false),
        ))
    }
}

#[derive(Debug, Deserialize)]
struct CreatePostPayload {
    post: PostPayload,
}

#[derive(Debug, Deserialize)]
struct PostListPayload {
    posts: Vec<PostPayload>,
}

/// Counts as returned by the toggle endpoint
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CountsPayload {
    pub support_count: i64,
    pub relate_count: i64,
}

/// Toggle response
#[derive(Debug, Deserialize)]
pub struct TogglePayload {
    pub success: bool,
    pub action: String,
    pub reaction_type: String,
    pub counts: CountsPayload,
}

/// HTTP client bound to one API base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client for `base_url` (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a response into `T` or a `ClientError::Api` with the server's reason
    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<ErrorPayload>()
            .await
            .ok()
            .and_then(|payload| payload.error)
            .unwrap_or_else(|| format!("server error ({status})"));

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch the feed, with per-device flags
    pub async fn list_posts(&self, device_id: &DeviceId) -> Result<Vec<PostPayload>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/v1/posts"))
            .query(&[("deviceId", device_id.as_str())])
            .send()
            .await?;

        let payload: PostListPayload = Self::decode(response).await?;
        Ok(payload.posts)
    }

    /// Submit a post; returns the authoritative record
    pub async fn create_post(&self, content: &str) -> Result<PostPayload, ClientError> {
        let response = self
            .http
            .post(self.url("/api/v1/posts"))
            .json(&json!({ "content": content }))
            .send()
            .await?;

        let payload: CreatePostPayload = Self::decode(response).await?;
        Ok(payload.post)
    }

    /// Toggle a reaction
    pub async fn toggle_reaction(
        &self,
        post_id: PostId,
        device_id: &DeviceId,
        kind: ReactionKind,
    ) -> Result<TogglePayload, ClientError> {
        let response = self
            .http
            .post(self.url("/api/v1/reactions"))
            .json(&json!({
                "post_id": post_id.to_string(),
                "reaction_type": kind,
                "device_id": device_id.as_str(),
            }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Remove a reaction outright (idempotent server-side)
    pub async fn remove_reaction(
        &self,
        post_id: PostId,
        device_id: &DeviceId,
        kind: ReactionKind,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url("/api/v1/reactions"))
            .json(&json!({
                "post_id": post_id.to_string(),
                "reaction_type": kind,
                "device_id": device_id.as_str(),
            }))
            .send()
            .await?;

        // Body is `{success: true}`; only the status matters here
        let _: serde_json::Value = Self::decode(response).await?;
        Ok(())
    }
}
