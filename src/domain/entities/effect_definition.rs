//! Effect definitions - catalog rules behind an effect or check identifier

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ActiveEffect, AppliedEffect, EffectSource};
use crate::domain::errors::RulesError;
use crate::domain::value_objects::{Attribute, ControlType, DurationTemplate, EffectKey, StatTarget};

/// A catalog entry, looked up by key while resolving an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectDefinition {
    pub key: EffectKey,
    pub name: String,
    pub kind: EffectKind,
}

/// The closed set of effect and check categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectKind {
    StatModifier {
        target: StatTarget,
        modifier: i32,
        duration: DurationTemplate,
    },
    RollBonus {
        target: StatTarget,
        bonus: i32,
        duration: DurationTemplate,
    },
    Control {
        control: ControlType,
        duration: DurationTemplate,
    },
    DamageOverTime {
        amount: i32,
        duration: DurationTemplate,
    },
    HealOverTime {
        amount: i32,
        duration: DurationTemplate,
    },
    /// d20 + stat + roll bonus against a fixed target number
    Check { stat: Attribute, target_number: i32 },
    /// Both sides roll; the defender uses `defender_stat`
    ContestedCheck {
        stat: Attribute,
        defender_stat: Attribute,
    },
    /// Actor must be the recorded owner of the resource
    Ownership,
}

impl EffectKind {
    pub fn is_check(&self) -> bool {
        matches!(
            self,
            Self::Check { .. } | Self::ContestedCheck { .. } | Self::Ownership
        )
    }
}

impl EffectDefinition {
    pub fn new(key: impl Into<EffectKey>, name: impl Into<String>, kind: EffectKind) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            kind,
        }
    }

    /// Build the active effect this definition produces on a successful application
    pub fn instantiate(&self, source: EffectSource) -> Result<ActiveEffect, RulesError> {
        let (applied, duration) = match &self.kind {
            EffectKind::StatModifier {
                target,
                modifier,
                duration,
            } => (
                AppliedEffect::StatModifier {
                    target: *target,
                    modifier: *modifier,
                },
                duration,
            ),
            EffectKind::RollBonus {
                target,
                bonus,
                duration,
            } => (
                AppliedEffect::RollBonus {
                    target: *target,
                    bonus: *bonus,
                },
                duration,
            ),
            EffectKind::Control { control, duration } => {
                (AppliedEffect::Control { control: *control }, duration)
            }
            EffectKind::DamageOverTime { amount, duration } => {
                (AppliedEffect::DamageOverTime { amount: *amount }, duration)
            }
            EffectKind::HealOverTime { amount, duration } => {
                (AppliedEffect::HealOverTime { amount: *amount }, duration)
            }
            EffectKind::Check { .. } | EffectKind::ContestedCheck { .. } | EffectKind::Ownership => {
                return Err(RulesError::NotApplicable(self.key.clone()));
            }
        };

        Ok(ActiveEffect::new(
            self.key.clone(),
            self.name.clone(),
            applied,
            duration.start(),
            source,
        ))
    }
}
