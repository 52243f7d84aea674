//! Service context - dependency container for services
//!
//! Holds the repositories, pools, rate limiter, and feed publisher needed by
//! the services. The rate limiter is injected state owned by this container,
//! not a process-global.

use std::sync::Arc;

use murmur_cache::{Publisher, SharedRedisPool};
use murmur_core::traits::{PostRepository, ReactionRepository};
use murmur_db::PgPool;

use crate::rate_limit::RateLimiter;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    post_repo: Arc<dyn PostRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,

    // Submission rate limiter
    rate_limiter: Arc<RateLimiter>,

    // Feed publisher
    publisher: Publisher,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        post_repo: Arc<dyn PostRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        let publisher = Publisher::new((*redis_pool).clone());

        Self {
            pool,
            redis_pool,
            post_repo,
            reaction_repo,
            rate_limiter,
            publisher,
        }
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the submission rate limiter
    pub fn rate_limiter(&self) -> &RateLimiter {
        self.rate_limiter.as_ref()
    }

    /// Get an owned handle to the rate limiter (for background sweep tasks)
    pub fn shared_rate_limiter(&self) -> Arc<RateLimiter> {
        Arc::clone(&self.rate_limiter)
    }

    /// Get the feed publisher
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    post_repo: Option<Arc<dyn PostRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    rate_limiter: Option<Arc<RateLimiter>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool.ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.redis_pool.ok_or_else(|| ServiceError::validation("redis_pool is required"))?,
            self.post_repo.ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            self.reaction_repo.ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.rate_limiter.ok_or_else(|| ServiceError::validation("rate_limiter is required"))?,
        ))
    }
}
