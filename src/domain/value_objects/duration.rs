//! Duration templates and the lifetimes they produce

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::RulesError;

/// How long a newly applied effect lasts, as written in the catalog
/// (`turns:N`, `scene`, `permanent`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DurationTemplate {
    Turns(u32),
    Scene,
    Permanent,
}

impl DurationTemplate {
    /// Fresh lifetime for an effect applied right now
    pub fn start(&self) -> EffectLifetime {
        match self {
            Self::Turns(n) => EffectLifetime::TurnScoped { remaining: *n },
            Self::Scene => EffectLifetime::SceneScoped,
            Self::Permanent => EffectLifetime::Permanent,
        }
    }
}

impl fmt::Display for DurationTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Turns(n) => write!(f, "turns:{}", n),
            Self::Scene => f.write_str("scene"),
            Self::Permanent => f.write_str("permanent"),
        }
    }
}

impl FromStr for DurationTemplate {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "scene" => return Ok(Self::Scene),
            "permanent" => return Ok(Self::Permanent),
            _ => {}
        }

        let turns = trimmed
            .strip_prefix("turns:")
            .and_then(|n| n.trim().parse::<u32>().ok())
            .filter(|n| *n > 0)
            .ok_or_else(|| RulesError::InvalidDuration(s.to_string()))?;
        Ok(Self::Turns(turns))
    }
}

impl TryFrom<String> for DurationTemplate {
    type Error = RulesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DurationTemplate> for String {
    fn from(template: DurationTemplate) -> Self {
        template.to_string()
    }
}

/// Lifecycle of an active effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectLifetime {
    /// Decays by one each turn the bearer takes; removed at zero
    TurnScoped { remaining: u32 },
    /// Lasts until the scene is cleared
    SceneScoped,
    Permanent,
}

impl EffectLifetime {
    pub fn is_scene_scoped(&self) -> bool {
        matches!(self, Self::SceneScoped)
    }

    pub fn remaining_turns(&self) -> Option<u32> {
        match self {
            Self::TurnScoped { remaining } => Some(*remaining),
            _ => None,
        }
    }
}
