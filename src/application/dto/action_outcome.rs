//! Structured results returned to game clients
//!
//! Soft failures (missing skill, failed roll) are carried here with the
//! success flag off; they are never errors.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ActiveEffect, LiveStats};
use crate::domain::value_objects::CharacterId;

/// A character an ability landed on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedCharacter {
    pub character_id: CharacterId,
    pub name: String,
    pub applied_effects: Vec<String>,
}

/// Result of a use-ability request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityOutcome {
    pub activation_success: bool,
    pub ability_name: String,
    pub affected: Vec<AffectedCharacter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_info: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills_missing: Vec<String>,
    /// Actor's own effects that ran out during this turn
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expired_effects: Vec<String>,
    pub message: String,
}

/// Result of a world-object action request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectActionOutcome {
    /// Sent as `"true"`/`"false"`; in-world scripts compare strings
    #[serde(with = "bool_as_string")]
    pub action_success: bool,
    pub object_name: String,
    pub object_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_info: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills_missing: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expired_effects: Vec<String>,
    pub message: String,
}

/// A character's effects after a lifecycle operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectStateDto {
    pub character_id: CharacterId,
    pub current_health: i32,
    pub active_effects: Vec<String>,
    pub live_stats: LiveStats,
    /// Effects removed by this operation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_effects: Vec<String>,
}

impl EffectStateDto {
    pub fn new(
        character_id: CharacterId,
        current_health: i32,
        active: &[ActiveEffect],
        live_stats: LiveStats,
        removed: &[ActiveEffect],
    ) -> Self {
        Self {
            character_id,
            current_health,
            active_effects: active.iter().map(ActiveEffect::summary).collect(),
            live_stats,
            removed_effects: removed.iter().map(|e| e.name.clone()).collect(),
        }
    }
}

mod bool_as_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(de::Error::custom(format!("expected \"true\" or \"false\", got {other}"))),
        }
    }
}
