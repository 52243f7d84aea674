//! Identifier types for posts and devices.
//!
//! Post ids are server-generated UUIDs. Device ids are client-generated
//! opaque tokens: the server stores and compares them but never validates
//! or trusts them - they are correlation keys, not credentials.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a stored post.
///
/// Serialized as a string for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(Uuid);

impl PostId {
    /// Wrap an existing UUID
    #[inline]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, PostIdParseError> {
        Uuid::parse_str(s).map(Self).map_err(|_| PostIdParseError::InvalidFormat)
    }
}

/// Error when parsing a `PostId` from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PostIdParseError {
    #[error("invalid post id format")]
    InvalidFormat,
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for PostId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<PostId> for Uuid {
    fn from(id: PostId) -> Self {
        id.0
    }
}

impl std::str::FromStr for PostId {
    type Err = PostIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostId::parse(s)
    }
}

/// Opaque per-device token used as the reaction actor key.
///
/// Generated client-side, persisted locally, stable across sessions.
/// Never inspected beyond equality comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl DeviceId {
    /// Wrap a raw token
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Borrow the raw token
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check for an empty token (rejected at the request boundary)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DeviceId {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for DeviceId {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}
