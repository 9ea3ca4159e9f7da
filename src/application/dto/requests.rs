//! Request bodies for the HTTP surface

use serde::Deserialize;

use crate::domain::value_objects::CharacterId;

/// Body of a use-ability request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseAbilityRequestDto {
    #[serde(default)]
    pub target_id: Option<CharacterId>,
    /// Characters the client considers in range
    #[serde(default)]
    pub nearby: Vec<CharacterId>,
}

/// Body of a world-object action request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectActionRequestDto {
    pub character_id: CharacterId,
}

/// Body of a scene-end request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearSceneRequestDto {
    pub character_ids: Vec<CharacterId>,
}
