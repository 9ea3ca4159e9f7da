//! Effect lifecycle routes

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{action_error, parse_character_id, ApiError};
use crate::application::dto::{ClearSceneRequestDto, EffectStateDto};
use crate::domain::entities::LiveStats;
use crate::domain::value_objects::EffectKey;
use crate::infrastructure::state::AppState;

/// Advance one turn for a character that acted outside the engine
pub async fn process_turn(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EffectStateDto>, ApiError> {
    let id = parse_character_id(&id)?;

    let result = state
        .effect_service
        .process_turn(id)
        .await
        .map_err(action_error)?;

    Ok(Json(result))
}

/// End the scene for the listed characters
pub async fn end_scene(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClearSceneRequestDto>,
) -> Result<Json<Vec<EffectStateDto>>, ApiError> {
    let cleared = state
        .effect_service
        .clear_scene(&req.character_ids)
        .await
        .map_err(action_error)?;

    Ok(Json(cleared))
}

pub async fn remove_effect(
    State(state): State<Arc<AppState>>,
    Path((id, effect)): Path<(String, String)>,
) -> Result<Json<EffectStateDto>, ApiError> {
    let id = parse_character_id(&id)?;

    let result = state
        .effect_service
        .remove_effect(id, &EffectKey::new(effect))
        .await
        .map_err(action_error)?;

    Ok(Json(result))
}

pub async fn get_live_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<LiveStats>, ApiError> {
    let id = parse_character_id(&id)?;

    let stats = state
        .effect_service
        .live_stats(id)
        .await
        .map_err(action_error)?;

    Ok(Json(stats))
}
