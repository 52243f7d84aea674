//! Post entity <-> model mapper

use murmur_core::entities::Post;
use murmur_core::value_objects::PostId;

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: PostId::from_uuid(model.id),
            content: model.content,
            created_at: model.created_at,
        }
    }
}
