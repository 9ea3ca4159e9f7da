//! JSON-backed catalog of effects, abilities and skills
//!
//! The whole catalog is validated once at load time. Every cross-reference
//! must resolve, so a lookup miss at request time means the catalog changed
//! underneath a running action, which the services report as a
//! configuration error.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::ports::outbound::CatalogPort;
use crate::domain::entities::{
    AbilityDefinition, EffectDefinition, EffectKind, SkillDefinition, WorldObject,
};
use crate::domain::value_objects::{AbilityKey, EffectKey, SkillKey};

/// Catalog inconsistencies found at load time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate {kind} key {key}")]
    Duplicate { kind: &'static str, key: String },

    #[error("{owner} references unknown effect {effect}")]
    UnknownEffect { owner: String, effect: EffectKey },

    #[error("{owner} applies {effect}, which is a check")]
    CheckAsEffect { owner: String, effect: EffectKey },

    #[error("{owner} uses {effect} as a check, but it is an applicable effect")]
    EffectAsCheck { owner: String, effect: EffectKey },

    #[error("{owner} cannot use {effect}: {reason}")]
    UnsupportedCheck {
        owner: String,
        effect: EffectKey,
        reason: &'static str,
    },
}

/// On-disk catalog layout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub effects: Vec<EffectDefinition>,
    #[serde(default)]
    pub abilities: Vec<AbilityDefinition>,
    #[serde(default)]
    pub skills: Vec<SkillDefinition>,
}

#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    effects: HashMap<EffectKey, EffectDefinition>,
    abilities: HashMap<AbilityKey, AbilityDefinition>,
    skills: HashMap<SkillKey, SkillDefinition>,
}

impl JsonCatalog {
    pub fn from_json(json: &str) -> Result<Self> {
        // Duration strings are parsed here, so `turns:0` fails the load
        let file: CatalogFile = serde_json::from_str(json).context("Catalog is not valid JSON")?;
        Ok(Self::from_file_contents(file)?)
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog = Self::from_json(&json)
            .with_context(|| format!("Invalid catalog {}", path.display()))?;

        info!(
            effects = catalog.effects.len(),
            abilities = catalog.abilities.len(),
            skills = catalog.skills.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_file_contents(file: CatalogFile) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for effect in file.effects {
            if catalog.effects.contains_key(&effect.key) {
                return Err(CatalogError::Duplicate {
                    kind: "effect",
                    key: effect.key.to_string(),
                });
            }
            catalog.effects.insert(effect.key.clone(), effect);
        }
        for skill in file.skills {
            if catalog.skills.contains_key(&skill.key) {
                return Err(CatalogError::Duplicate {
                    kind: "skill",
                    key: skill.key.to_string(),
                });
            }
            catalog.skills.insert(skill.key.clone(), skill);
        }
        for ability in file.abilities {
            if catalog.abilities.contains_key(&ability.key) {
                return Err(CatalogError::Duplicate {
                    kind: "ability",
                    key: ability.key.to_string(),
                });
            }
            let owner = format!("Ability {}", ability.key);
            for effect in &ability.effects {
                catalog.require_applicable(&owner, effect)?;
            }
            if let Some(check) = &ability.check {
                if let EffectKind::Ownership = catalog.require_check(&owner, check)?.kind {
                    return Err(CatalogError::UnsupportedCheck {
                        owner,
                        effect: check.clone(),
                        reason: "abilities have no owned resource",
                    });
                }
            }
            catalog.abilities.insert(ability.key.clone(), ability);
        }

        Ok(catalog)
    }

    /// Verify every object action's check against this catalog
    pub fn validate_objects(&self, objects: &[WorldObject]) -> Result<(), CatalogError> {
        for object in objects {
            for action in &object.actions {
                if let Some(check) = &action.check {
                    let owner = format!("Action {} on {}", action.name, object.key);
                    if let EffectKind::ContestedCheck { .. } = self.require_check(&owner, check)?.kind {
                        return Err(CatalogError::UnsupportedCheck {
                            owner,
                            effect: check.clone(),
                            reason: "objects cannot be contested",
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn require_applicable(&self, owner: &str, key: &EffectKey) -> Result<(), CatalogError> {
        let effect = self.effects.get(key).ok_or_else(|| CatalogError::UnknownEffect {
            owner: owner.to_string(),
            effect: key.clone(),
        })?;
        if effect.kind.is_check() {
            return Err(CatalogError::CheckAsEffect {
                owner: owner.to_string(),
                effect: key.clone(),
            });
        }
        Ok(())
    }

    fn require_check(&self, owner: &str, key: &EffectKey) -> Result<&EffectDefinition, CatalogError> {
        let effect = self.effects.get(key).ok_or_else(|| CatalogError::UnknownEffect {
            owner: owner.to_string(),
            effect: key.clone(),
        })?;
        if !effect.kind.is_check() {
            return Err(CatalogError::EffectAsCheck {
                owner: owner.to_string(),
                effect: key.clone(),
            });
        }
        Ok(effect)
    }
}

impl CatalogPort for JsonCatalog {
    fn effect(&self, key: &EffectKey) -> Option<EffectDefinition> {
        self.effects.get(key).cloned()
    }

    fn ability(&self, key: &AbilityKey) -> Option<AbilityDefinition> {
        self.abilities.get(key).cloned()
    }

    fn skill(&self, key: &SkillKey) -> Option<SkillDefinition> {
        self.skills.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{TargetingMode, WorldObjectAction};
    use crate::domain::value_objects::{Attribute, DurationTemplate};

    const SAMPLE: &str = r#"{
        "effects": [
            {"key": "buff_focus", "name": "Focus",
             "kind": {"type": "stat_modifier", "target": "mental", "modifier": 2, "duration": "turns:3"}},
            {"key": "check_hack", "name": "Hacking Check",
             "kind": {"type": "check", "stat": "mental", "target_number": 12}},
            {"key": "owner_only", "name": "Owner Only", "kind": {"type": "ownership"}}
        ],
        "abilities": [
            {"key": "focus", "name": "Focus", "targeting": "self", "effects": ["buff_focus"]}
        ],
        "skills": [{"key": "skill_hack", "name": "Hacking"}]
    }"#;

    #[test]
    fn test_sample_catalog_loads() {
        let catalog = JsonCatalog::from_json(SAMPLE).unwrap();

        let focus = catalog.effect(&EffectKey::new("buff_focus")).unwrap();
        assert!(matches!(
            focus.kind,
            EffectKind::StatModifier {
                modifier: 2,
                duration: DurationTemplate::Turns(3),
                ..
            }
        ));
        let ability = catalog.ability(&AbilityKey::new("focus")).unwrap();
        assert_eq!(ability.targeting, TargetingMode::SelfOnly);
        assert_eq!(
            catalog.skill(&SkillKey::new("skill_hack")).map(|s| s.name),
            Some("Hacking".to_string())
        );
        assert!(catalog.ability(&AbilityKey::new("missing")).is_none());
    }

    #[test]
    fn test_zero_turn_duration_is_rejected() {
        let json = SAMPLE.replace("turns:3", "turns:0");
        assert!(JsonCatalog::from_json(&json).is_err());
    }

    #[test]
    fn test_cross_references_are_validated() {
        let check = EffectDefinition::new(
            "check_hack",
            "Hacking Check",
            EffectKind::Check {
                stat: Attribute::Mental,
                target_number: 12,
            },
        );

        let file = CatalogFile {
            effects: vec![check.clone()],
            abilities: vec![AbilityDefinition::new("hack", "Hack", TargetingMode::SelfOnly)
                .with_effect("check_hack")],
            skills: Vec::new(),
        };
        assert!(matches!(
            JsonCatalog::from_file_contents(file),
            Err(CatalogError::CheckAsEffect { .. })
        ));

        let file = CatalogFile {
            effects: vec![check],
            abilities: vec![AbilityDefinition::new("scan", "Scan", TargetingMode::SingleTarget)
                .with_check("check_missing")],
            skills: Vec::new(),
        };
        assert!(matches!(
            JsonCatalog::from_file_contents(file),
            Err(CatalogError::UnknownEffect { .. })
        ));
    }

    #[test]
    fn test_object_checks_are_validated() {
        let catalog = JsonCatalog::from_json(SAMPLE).unwrap();
        let good = WorldObject::new("terminal", "neon", "Terminal", "locked")
            .with_action(WorldObjectAction::new("Hack", "unlocked").with_check("check_hack"));
        assert!(catalog.validate_objects(&[good]).is_ok());

        let bad = WorldObject::new("terminal", "neon", "Terminal", "locked")
            .with_action(WorldObjectAction::new("Hack", "unlocked").with_check("buff_focus"));
        assert!(matches!(
            catalog.validate_objects(&[bad]),
            Err(CatalogError::EffectAsCheck { .. })
        ));
    }

    #[test]
    fn test_unresolvable_check_pairings_are_rejected() {
        let json = SAMPLE.replace(
            r#""effects": ["buff_focus"]}"#,
            r#""effects": ["buff_focus"]},
            {"key": "claim", "name": "Claim", "targeting": "self", "check": "owner_only"}"#,
        );
        assert!(matches!(
            JsonCatalog::from_file_contents(serde_json::from_str(&json).unwrap()),
            Err(CatalogError::UnsupportedCheck { .. })
        ));

        let mut file: CatalogFile = serde_json::from_str(SAMPLE).unwrap();
        file.effects.push(EffectDefinition::new(
            "contest_grapple",
            "Grapple",
            EffectKind::ContestedCheck {
                stat: Attribute::Physical,
                defender_stat: Attribute::Physical,
            },
        ));
        let catalog = JsonCatalog::from_file_contents(file).unwrap();

        let owned = WorldObject::new("locker", "neon", "Locker", "locked")
            .with_action(WorldObjectAction::new("Open", "open").with_check("owner_only"));
        assert!(catalog.validate_objects(&[owned]).is_ok());

        let contested = WorldObject::new("door", "neon", "Door", "closed")
            .with_action(WorldObjectAction::new("Force", "open").with_check("contest_grapple"));
        assert!(matches!(
            catalog.validate_objects(&[contested]),
            Err(CatalogError::UnsupportedCheck { .. })
        ));
    }

    #[test]
    fn test_bundled_catalog_is_consistent() {
        let catalog = JsonCatalog::from_json(include_str!("../../data/catalog.json")).unwrap();
        assert!(catalog.skill(&SkillKey::new("skill_hack")).is_some());
    }
}
