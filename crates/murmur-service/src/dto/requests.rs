//! Request DTOs for API endpoints
//!
//! Shape validation (presence, length) happens here with the `validator`
//! crate. The authoritative content policy check runs separately in the
//! domain layer on every submission.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Post Requests
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,
}

/// Query parameters for the feed listing.
///
/// The device id rides along so the listing can mark which posts this
/// device already reacted to. The parameter name is camelCase on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsQuery {
    #[serde(rename = "deviceId")]
    pub device_id: Option<String>,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// The reaction identity triple, used by both toggle (POST) and remove
/// (DELETE). `reaction_type` is kept as a raw string here so an unknown
/// kind produces the dedicated invalid-type message instead of a generic
/// deserialization failure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReactionRequest {
    #[validate(length(min = 1, message = "post_id is required"))]
    pub post_id: String,

    #[validate(length(min = 1, message = "reaction_type is required"))]
    pub reaction_type: String,

    #[validate(length(min = 1, message = "device_id is required"))]
    pub device_id: String,
}

/// Query parameters for reading reaction state
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionStateQuery {
    pub post_id: String,
    pub device_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_post_request_length_bounds() {
        let ok = CreatePostRequest {
            content: "hello".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = CreatePostRequest {
            content: String::new(),
        };
        assert!(empty.validate().is_err());

        let oversized = CreatePostRequest {
            content: "x".repeat(5001),
        };
        assert!(oversized.validate().is_err());
    }

    #[test]
    fn test_reaction_request_requires_all_fields() {
        let request = ReactionRequest {
            post_id: String::new(),
            reaction_type: "support".to_string(),
            device_id: "d".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_list_posts_query_device_id_is_camel_case() {
        let query: ListPostsQuery = serde_json::from_str(r#"{"deviceId": "abc"}"#).unwrap();
        assert_eq!(query.device_id.as_deref(), Some("abc"));
    }
}
