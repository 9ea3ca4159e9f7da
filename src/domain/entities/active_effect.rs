//! Active effects - temporary modifiers and conditions attached to a character

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ControlType, EffectKey, EffectLifetime, StatTarget};

/// One temporary condition on a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub effect: EffectKey,
    pub name: String,
    pub applied: AppliedEffect,
    pub lifetime: EffectLifetime,
    pub source: EffectSource,
}

impl ActiveEffect {
    pub fn new(
        effect: EffectKey,
        name: impl Into<String>,
        applied: AppliedEffect,
        lifetime: EffectLifetime,
        source: EffectSource,
    ) -> Self {
        Self {
            effect,
            name: name.into(),
            applied,
            lifetime,
            source,
        }
    }

    /// Short human-readable description, e.g. "Defensive Stance (+5 all rolls, 3 turns)"
    pub fn summary(&self) -> String {
        let what = match &self.applied {
            AppliedEffect::StatModifier { target, modifier } => format!("{:+} {}", modifier, target),
            AppliedEffect::RollBonus { target, bonus } => format!("{:+} {} rolls", bonus, target),
            AppliedEffect::Control { control } => control.condition_name().to_string(),
            AppliedEffect::DamageOverTime { amount } => format!("{} damage per turn", amount),
            AppliedEffect::HealOverTime { amount } => format!("{} healing per turn", amount),
        };
        let how_long = match self.lifetime {
            EffectLifetime::TurnScoped { remaining: 1 } => "1 turn".to_string(),
            EffectLifetime::TurnScoped { remaining } => format!("{} turns", remaining),
            EffectLifetime::SceneScoped => "this scene".to_string(),
            EffectLifetime::Permanent => "permanent".to_string(),
        };
        format!("{} ({}, {})", self.name, what, how_long)
    }
}

/// What an active effect does while it lasts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum AppliedEffect {
    /// Flat change to the displayed stat value
    StatModifier { target: StatTarget, modifier: i32 },
    /// Added to dice totals only, never to the displayed stat
    RollBonus { target: StatTarget, bonus: i32 },
    Control { control: ControlType },
    DamageOverTime { amount: i32 },
    HealOverTime { amount: i32 },
}

/// Who applied an effect, and when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSource {
    pub applied_by: String,
    pub applied_at: DateTime<Utc>,
}

impl EffectSource {
    pub fn new(applied_by: impl Into<String>, applied_at: DateTime<Utc>) -> Self {
        Self {
            applied_by: applied_by.into(),
            applied_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Attribute;

    #[test]
    fn test_summary_describes_effect() {
        let effect = ActiveEffect::new(
            EffectKey::new("buff_focus"),
            "Focus",
            AppliedEffect::StatModifier {
                target: StatTarget::Attribute(Attribute::Mental),
                modifier: 2,
            },
            EffectLifetime::TurnScoped { remaining: 3 },
            EffectSource::new("Juno", Utc::now()),
        );
        assert_eq!(effect.summary(), "Focus (+2 mental, 3 turns)");
    }

    #[test]
    fn test_applied_effect_is_tagged_by_category() {
        let json = serde_json::to_value(AppliedEffect::Control {
            control: ControlType::Stun,
        })
        .unwrap();
        assert_eq!(json["category"], "control");
        assert_eq!(json["control"], "stun");
    }
}
