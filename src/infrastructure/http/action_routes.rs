//! Action API routes - abilities and world-object actions

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{action_error, parse_character_id, ApiError};
use crate::application::dto::{
    AbilityOutcome, ObjectActionOutcome, ObjectActionRequestDto, UseAbilityRequestDto,
};
use crate::application::services::{ObjectActionRequest, UseAbilityRequest};
use crate::domain::value_objects::{AbilityKey, ObjectKey, UniverseKey};
use crate::infrastructure::state::AppState;

/// Activate an ability.
///
/// A missing skill or failed roll is still a 200 with `activationSuccess`
/// false.
pub async fn use_ability(
    State(state): State<Arc<AppState>>,
    Path((id, ability)): Path<(String, String)>,
    Json(req): Json<UseAbilityRequestDto>,
) -> Result<Json<AbilityOutcome>, ApiError> {
    let actor = parse_character_id(&id)?;

    let outcome = state
        .ability_service
        .use_ability(UseAbilityRequest {
            actor,
            ability: AbilityKey::new(ability),
            target: req.target_id,
            nearby: req.nearby,
        })
        .await
        .map_err(action_error)?;

    Ok(Json(outcome))
}

/// Perform an action on a world object
pub async fn perform_object_action(
    State(state): State<Arc<AppState>>,
    Path((universe, object, action)): Path<(String, String, String)>,
    Json(req): Json<ObjectActionRequestDto>,
) -> Result<Json<ObjectActionOutcome>, ApiError> {
    let outcome = state
        .object_action_service
        .perform_action(ObjectActionRequest {
            actor: req.character_id,
            object: ObjectKey::new(object),
            universe: UniverseKey::new(universe),
            action,
        })
        .await
        .map_err(action_error)?;

    Ok(Json(outcome))
}
