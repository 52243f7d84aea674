//! Database models - row shapes with SQLx `FromRow` derives

mod post;
mod reaction;

pub use post::PostModel;
pub use reaction::{KindCountModel, PostKindCountModel, PostKindModel, ReactionModel};
