//! Ability and skill catalog entries

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AbilityKey, ControlType, EffectKey, SkillKey};

/// How an ability picks the characters it affects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetingMode {
    #[serde(rename = "self")]
    SelfOnly,
    SingleTarget,
    AllAllies,
    AllEnemies,
    AllAlliesAndSelf,
    AllEnemiesAndSelf,
}

/// An ability a character can activate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub key: AbilityKey,
    pub name: String,
    pub targeting: TargetingMode,
    /// Effects applied to every affected character on success
    #[serde(default)]
    pub effects: Vec<EffectKey>,
    /// Check that must pass before the effects land
    #[serde(default)]
    pub check: Option<EffectKey>,
    /// `skill,level OR skill,level` expression
    #[serde(default)]
    pub required_skills: Option<String>,
    #[serde(default)]
    pub cooldown_secs: u64,
    /// Extra controls that block this ability on top of stun/sleep/daze
    #[serde(default)]
    pub blocked_by: Option<Vec<ControlType>>,
}

impl AbilityDefinition {
    pub fn new(key: impl Into<AbilityKey>, name: impl Into<String>, targeting: TargetingMode) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            targeting,
            effects: Vec::new(),
            check: None,
            required_skills: None,
            cooldown_secs: 0,
            blocked_by: None,
        }
    }

    pub fn with_effect(mut self, effect: impl Into<EffectKey>) -> Self {
        self.effects.push(effect.into());
        self
    }

    pub fn with_check(mut self, check: impl Into<EffectKey>) -> Self {
        self.check = Some(check.into());
        self
    }

    pub fn with_required_skills(mut self, expression: impl Into<String>) -> Self {
        self.required_skills = Some(expression.into());
        self
    }

    pub fn with_cooldown(mut self, secs: u64) -> Self {
        self.cooldown_secs = secs;
        self
    }

    pub fn with_blocked_by(mut self, controls: Vec<ControlType>) -> Self {
        self.blocked_by = Some(controls);
        self
    }

    /// The default blocking set plus anything this ability adds
    pub fn blocking_controls(&self) -> Vec<ControlType> {
        let mut controls = ControlType::DEFAULT_BLOCKING.to_vec();
        for control in self.blocked_by.iter().flatten() {
            if !controls.contains(control) {
                controls.push(*control);
            }
        }
        controls
    }
}

/// A trainable skill, used for display names in requirement messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub key: SkillKey,
    pub name: String,
}

impl SkillDefinition {
    pub fn new(key: impl Into<SkillKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}
