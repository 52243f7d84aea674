//! Post entity - an anonymous confession on the board

use chrono::{DateTime, Utc};

use crate::value_objects::PostId;

/// Post entity
///
/// Immutable once created: there is no edit or delete. The content is the
/// normalized form produced by the content validator, never the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new Post with a fresh id
    pub fn new(id: PostId, content: String) -> Self {
        Self {
            id,
            content,
            created_at: Utc::now(),
        }
    }

    /// Get a truncated preview of the content (for log lines)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }
}
