//! Ports - interfaces the domain expects infrastructure to provide

mod repositories;

pub use repositories::{PostRepository, ReactionRepository, RepoResult};
