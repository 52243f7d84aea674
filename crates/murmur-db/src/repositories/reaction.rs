//! PostgreSQL implementation of ReactionRepository
//!
//! Uniqueness of `(post_id, device_id, kind)` is enforced by the table
//! constraint; a violating insert is the benign side of a concurrent toggle
//! race and maps to `DomainError::ReactionAlreadyExists`.

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

use murmur_core::entities::{ActorReactions, Reaction, ReactionKind, ReactionTally};
use murmur_core::error::DomainError;
use murmur_core::traits::{ReactionRepository, RepoResult};
use murmur_core::value_objects::{DeviceId, PostId};

use crate::mappers::parse_kind;
use crate::models::{KindCountModel, PostKindCountModel, PostKindModel, ReactionModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        post_id: PostId,
        device_id: &DeviceId,
        kind: ReactionKind,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT post_id, device_id, kind, created_at
            FROM reactions
            WHERE post_id = $1 AND device_id = $2 AND kind = $3
            "#,
        )
        .bind(post_id.into_inner())
        .bind(device_id.as_str())
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Reaction>> {
        let results = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT post_id, device_id, kind, created_at
            FROM reactions
            WHERE post_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reaction::try_from).collect()
    }

    #[instrument(skip(self, reaction), fields(post_id = %reaction.post_id, kind = %reaction.kind))]
    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reactions (post_id, device_id, kind, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(reaction.post_id.into_inner())
        .bind(reaction.device_id.as_str())
        .bind(reaction.kind.as_str())
        .bind(reaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ReactionAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        post_id: PostId,
        device_id: &DeviceId,
        kind: ReactionKind,
    ) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM reactions WHERE post_id = $1 AND device_id = $2 AND kind = $3
            "#,
        )
        .bind(post_id.into_inner())
        .bind(device_id.as_str())
        .bind(kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn tally(&self, post_id: PostId) -> RepoResult<ReactionTally> {
        let rows = sqlx::query_as::<_, KindCountModel>(
            r#"
            SELECT kind, COUNT(*) as count
            FROM reactions
            WHERE post_id = $1
            GROUP BY kind
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut tally = ReactionTally::default();
        for row in rows {
            tally.set(parse_kind(&row.kind)?, row.count);
        }
        Ok(tally)
    }

    #[instrument(skip(self, post_ids), fields(posts = post_ids.len()))]
    async fn tally_many(&self, post_ids: &[PostId]) -> RepoResult<HashMap<PostId, ReactionTally>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<Uuid> = post_ids.iter().map(|id| id.into_inner()).collect();

        let rows = sqlx::query_as::<_, PostKindCountModel>(
            r#"
            SELECT post_id, kind, COUNT(*) as count
            FROM reactions
            WHERE post_id = ANY($1)
            GROUP BY post_id, kind
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut tallies: HashMap<PostId, ReactionTally> = HashMap::new();
        for row in rows {
            let kind = parse_kind(&row.kind)?;
            tallies
                .entry(PostId::from_uuid(row.post_id))
                .or_default()
                .set(kind, row.count);
        }
        Ok(tallies)
    }

    #[instrument(skip(self))]
    async fn actor_flags(
        &self,
        post_id: PostId,
        device_id: &DeviceId,
    ) -> RepoResult<ActorReactions> {
        let kinds = sqlx::query_scalar::<_, String>(
            r#"
            SELECT kind
            FROM reactions
            WHERE post_id = $1 AND device_id = $2
            "#,
        )
        .bind(post_id.into_inner())
        .bind(device_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut flags = ActorReactions::default();
        for raw in kinds {
            flags.set(parse_kind(&raw)?, true);
        }
        Ok(flags)
    }

    #[instrument(skip(self, post_ids), fields(posts = post_ids.len()))]
    async fn actor_flags_many(
        &self,
        post_ids: &[PostId],
        device_id: &DeviceId,
    ) -> RepoResult<HashMap<PostId, ActorReactions>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<Uuid> = post_ids.iter().map(|id| id.into_inner()).collect();

        let rows = sqlx::query_as::<_, PostKindModel>(
            r#"
            SELECT post_id, kind
            FROM reactions
            WHERE post_id = ANY($1) AND device_id = $2
            "#,
        )
        .bind(&ids)
        .bind(device_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut flags: HashMap<PostId, ActorReactions> = HashMap::new();
        for row in rows {
            let kind = parse_kind(&row.kind)?;
            flags
                .entry(PostId::from_uuid(row.post_id))
                .or_default()
                .set(kind, true);
        }
        Ok(flags)
    }
}
