//! PostgreSQL repository implementations

mod error;
mod post;
mod reaction;

pub use error::{map_db_error, map_unique_violation};
pub use post::PgPostRepository;
pub use reaction::PgReactionRepository;
