//! Reaction service
//!
//! The toggle engine: decides add-vs-remove from current record presence,
//! mutates the record set, and recomputes both aggregate counts so every
//! response is self-consistent.

use murmur_core::entities::{ActorReactions, Reaction, ReactionKind, ReactionTally};
use murmur_core::value_objects::{DeviceId, PostId};
use murmur_core::DomainError;
use serde_json::json;
use tracing::{info, instrument};

use crate::dto::{
    ReactionAction, ReactionRecordResponse, ReactionStateResponse, ToggleReactionResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle a device's reaction on a post.
    ///
    /// Presence of the `(post, device, kind)` record decides the direction:
    /// present deletes, absent inserts. A concurrent insert of the same
    /// identity loses to the uniqueness constraint and surfaces as the
    /// distinct already-reacted conflict rather than a storage failure.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        post_id: PostId,
        device_id: DeviceId,
        kind: ReactionKind,
    ) -> ServiceResult<ToggleReactionResponse> {
        // Verify the post exists so a bad id is a 404, not a constraint error
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let existing = self.ctx.reaction_repo().find(post_id, &device_id, kind).await?;

        let action = if existing.is_some() {
            self.ctx.reaction_repo().delete(post_id, &device_id, kind).await?;
            ReactionAction::Removed
        } else {
            let reaction = Reaction::new(post_id, device_id.clone(), kind);
            self.ctx.reaction_repo().create(&reaction).await?;
            ReactionAction::Added
        };

        // Both counts together, even though only one kind changed
        let counts = self.ctx.reaction_repo().tally(post_id).await?;

        info!(
            post_id = %post_id,
            kind = %kind,
            action = ?action,
            "Reaction toggled"
        );

        self.publish_update(post_id, kind, counts).await;

        Ok(ToggleReactionResponse {
            success: true,
            action,
            reaction_type: kind,
            counts,
        })
    }

    /// Remove a device's reaction outright.
    ///
    /// Idempotent: removing an absent record succeeds and changes nothing.
    #[instrument(skip(self))]
    pub async fn remove(
        &self,
        post_id: PostId,
        device_id: DeviceId,
        kind: ReactionKind,
    ) -> ServiceResult<()> {
        let removed = self.ctx.reaction_repo().delete(post_id, &device_id, kind).await?;

        if removed {
            info!(post_id = %post_id, kind = %kind, "Reaction removed");
            let counts = self.ctx.reaction_repo().tally(post_id).await?;
            self.publish_update(post_id, kind, counts).await;
        }

        Ok(())
    }

    /// Read the full reaction state of a post.
    ///
    /// Counts are derived from the record set fetched in the same read, so
    /// data, counts, and flags cannot disagree with each other. Per-actor
    /// flags are only meaningful when a device id was supplied; without one
    /// both report false.
    #[instrument(skip(self))]
    pub async fn get_state(
        &self,
        post_id: PostId,
        device_id: Option<DeviceId>,
    ) -> ServiceResult<ReactionStateResponse> {
        let records = self.ctx.reaction_repo().find_by_post(post_id).await?;

        let mut counts = ReactionTally::default();
        for record in &records {
            counts.set(record.kind, counts.count(record.kind) + 1);
        }

        let mut user_reactions = ActorReactions::default();
        if let Some(device) = &device_id {
            for record in records.iter().filter(|r| &r.device_id == device) {
                user_reactions.set(record.kind, true);
            }
        }

        Ok(ReactionStateResponse {
            success: true,
            data: records.iter().map(ReactionRecordResponse::from).collect(),
            counts,
            user_reactions,
        })
    }

    /// Push the new counts onto the change feed; delivery is best-effort
    async fn publish_update(&self, post_id: PostId, kind: ReactionKind, counts: ReactionTally) {
        self.ctx
            .publisher()
            .publish_reaction_update(json!({
                "post_id": post_id.to_string(),
                "reaction_type": kind,
                "support_count": counts.support_count,
                "relate_count": counts.relate_count,
            }))
            .await
            .ok();
    }
}
