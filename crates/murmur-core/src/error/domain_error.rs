//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::content::ContentRejection;
use crate::value_objects::PostId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error(transparent)]
    ContentRejected(#[from] ContentRejection),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid reaction type: must be \"support\" or \"relate\"")]
    InvalidReactionKind,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Already reacted")]
    ReactionAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::ContentRejected(rejection) => rejection.code(),
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidReactionKind => "INVALID_REACTION_TYPE",
            Self::ReactionAlreadyExists => "ALREADY_REACTED",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PostNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ContentRejected(_) | Self::ValidationError(_) | Self::InvalidReactionKind
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ReactionAlreadyExists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::PostNotFound(PostId::generate());
        assert_eq!(err.code(), "UNKNOWN_POST");

        let err = DomainError::ReactionAlreadyExists;
        assert_eq!(err.code(), "ALREADY_REACTED");

        let err = DomainError::from(ContentRejection::Spam);
        assert_eq!(err.code(), "SPAM_CONTENT");
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::PostNotFound(PostId::generate()).is_not_found());
        assert!(DomainError::InvalidReactionKind.is_validation());
        assert!(DomainError::from(ContentRejection::Empty).is_validation());
        assert!(DomainError::ReactionAlreadyExists.is_conflict());
        assert!(!DomainError::DatabaseError("boom".to_string()).is_validation());
    }

    #[test]
    fn test_content_rejection_message_passthrough() {
        let err = DomainError::from(ContentRejection::TooManyWords);
        assert_eq!(err.to_string(), "Maximum 200 words allowed");
    }
}
