//! Reaction entity <-> model mapper

use murmur_core::entities::{Reaction, ReactionKind};
use murmur_core::error::DomainError;
use murmur_core::value_objects::{DeviceId, PostId};

use crate::models::ReactionModel;

/// Parse a stored kind column.
///
/// The table's CHECK constraint only admits the two wire names, so a failure
/// here means the schema and the code disagree - surfaced as a database
/// error, not a validation error.
pub fn parse_kind(raw: &str) -> Result<ReactionKind, DomainError> {
    ReactionKind::parse(raw)
        .ok_or_else(|| DomainError::DatabaseError(format!("unknown reaction kind in store: {raw}")))
}

impl TryFrom<ReactionModel> for Reaction {
    type Error = DomainError;

    fn try_from(model: ReactionModel) -> Result<Self, Self::Error> {
        Ok(Reaction {
            post_id: PostId::from_uuid(model.post_id),
            device_id: DeviceId::new(model.device_id),
            kind: parse_kind(&model.kind)?,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("support").unwrap(), ReactionKind::Support);
        assert_eq!(parse_kind("relate").unwrap(), ReactionKind::Relate);
        assert!(parse_kind("upvote").is_err());
    }
}
