//! Reaction handlers
//!
//! Toggle, explicit removal, and state reads for post reactions.

use axum::{
    extract::{Query, State},
    Json,
};
use murmur_core::entities::ReactionKind;
use murmur_core::value_objects::{DeviceId, PostId};
use murmur_core::DomainError;
use murmur_service::{
    ReactionRequest, ReactionService, ReactionStateQuery, ReactionStateResponse,
    RemoveReactionResponse, ToggleReactionResponse,
};

use crate::extractors::ValidatedJson;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Parse the identity triple shared by toggle and remove
fn parse_identity(request: &ReactionRequest) -> Result<(PostId, DeviceId, ReactionKind), ApiError> {
    let post_id = request
        .post_id
        .parse()
        .map_err(|_| ApiError::invalid_query("Invalid post_id format"))?;
    let kind = ReactionKind::parse(&request.reaction_type)
        .ok_or(ApiError::Domain(DomainError::InvalidReactionKind))?;
    Ok((post_id, DeviceId::new(request.device_id.clone()), kind))
}

/// Toggle a reaction
///
/// POST /api/v1/reactions
pub async fn toggle_reaction(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ReactionRequest>,
) -> ApiResult<Json<ToggleReactionResponse>> {
    let (post_id, device_id, kind) = parse_identity(&request)?;

    let service = ReactionService::new(state.service_context());
    let response = service.toggle(post_id, device_id, kind).await?;
    Ok(Json(response))
}

/// Remove a reaction (idempotent)
///
/// DELETE /api/v1/reactions
pub async fn remove_reaction(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ReactionRequest>,
) -> ApiResult<Json<RemoveReactionResponse>> {
    let (post_id, device_id, kind) = parse_identity(&request)?;

    let service = ReactionService::new(state.service_context());
    service.remove(post_id, device_id, kind).await?;
    Ok(Json(RemoveReactionResponse { success: true }))
}

/// Read a post's reaction state
///
/// GET /api/v1/reactions?post_id=...&device_id=...
pub async fn get_reaction_state(
    State(state): State<AppState>,
    Query(query): Query<ReactionStateQuery>,
) -> ApiResult<Json<ReactionStateResponse>> {
    let post_id = query
        .post_id
        .parse()
        .map_err(|_| ApiError::invalid_query("Invalid post_id format"))?;
    let device_id = query
        .device_id
        .filter(|token| !token.is_empty())
        .map(DeviceId::new);

    let service = ReactionService::new(state.service_context());
    let response = service.get_state(post_id, device_id).await?;
    Ok(Json(response))
}
