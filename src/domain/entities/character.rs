//! Character sheet entity - the persisted row the engine reads and writes per request

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ActiveEffect, LiveStats};
use crate::domain::services::calculate_live_stats;
use crate::domain::value_objects::{AbilityKey, Attribute, CharacterId, PlayMode, SkillKey};

/// A player character as seen by the rules engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub id: CharacterId,
    pub name: String,
    /// Whether character creation has been completed
    #[serde(default = "default_registered")]
    pub registered: bool,
    #[serde(default)]
    pub mode: PlayMode,
    pub base_stats: BaseStats,
    pub current_health: i32,
    pub max_health: i32,
    #[serde(default)]
    pub skills: SkillLevels,
    #[serde(default)]
    pub abilities: BTreeSet<AbilityKey>,
    #[serde(default)]
    pub active_effects: Vec<ActiveEffect>,
    /// Cached projection of base stats and effects, rewritten on every mutation
    #[serde(default)]
    pub live_stats: LiveStats,
}

fn default_registered() -> bool {
    true
}

impl CharacterSheet {
    pub fn new(name: impl Into<String>, base_stats: BaseStats, max_health: i32) -> Self {
        let live_stats = calculate_live_stats(&base_stats, &[]);
        Self {
            id: CharacterId::new(),
            name: name.into(),
            registered: true,
            mode: PlayMode::InCharacter,
            base_stats,
            current_health: max_health,
            max_health,
            skills: SkillLevels::default(),
            abilities: BTreeSet::new(),
            active_effects: Vec::new(),
            live_stats,
        }
    }

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_skill(mut self, skill: impl Into<SkillKey>, level: u32) -> Self {
        self.skills.set(skill, level);
        self
    }

    pub fn with_ability(mut self, ability: impl Into<AbilityKey>) -> Self {
        self.abilities.insert(ability.into());
        self
    }

    pub fn with_mode(mut self, mode: PlayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set current health, clamped to `[0, max_health]`
    pub fn with_health(mut self, current: i32) -> Self {
        self.set_health(current);
        self
    }

    pub fn unregistered(mut self) -> Self {
        self.registered = false;
        self
    }

    pub fn set_health(&mut self, current: i32) {
        self.current_health = current.clamp(0, self.max_health.max(0));
    }

    pub fn is_conscious(&self) -> bool {
        self.current_health > 0
    }

    pub fn knows_ability(&self, ability: &AbilityKey) -> bool {
        self.abilities.contains(ability)
    }
}

/// Unmodified attribute scores; never changed by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseStats(BTreeMap<Attribute, i32>);

impl BaseStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stat(mut self, attribute: Attribute, value: i32) -> Self {
        self.0.insert(attribute, value);
        self
    }

    /// Missing attributes count as zero
    pub fn get(&self, attribute: Attribute) -> i32 {
        self.0.get(&attribute).copied().unwrap_or(0)
    }
}

/// Skill key to trained level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillLevels(BTreeMap<SkillKey, u32>);

impl SkillLevels {
    pub fn set(&mut self, skill: impl Into<SkillKey>, level: u32) {
        self.0.insert(skill.into(), level);
    }

    pub fn level(&self, skill: &SkillKey) -> Option<u32> {
        self.0.get(skill).copied()
    }
}

impl<K: Into<SkillKey>> FromIterator<(K, u32)> for SkillLevels {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_is_clamped_to_max() {
        let sheet = CharacterSheet::new("Vex", BaseStats::new(), 10).with_health(25);
        assert_eq!(sheet.current_health, 10);

        let sheet = sheet.with_health(-4);
        assert_eq!(sheet.current_health, 0);
        assert!(!sheet.is_conscious());
    }

    #[test]
    fn test_missing_attribute_reads_as_zero() {
        let stats = BaseStats::new().with_stat(Attribute::Mental, 3);
        assert_eq!(stats.get(Attribute::Mental), 3);
        assert_eq!(stats.get(Attribute::Social), 0);
    }

    #[test]
    fn test_sheet_deserializes_with_defaults() {
        let json = r#"{
            "id": "6c3f1a7e-0c55-4a8e-9d55-2f1f4f2b9a10",
            "name": "Juno",
            "base_stats": {"physical": 2, "mental": 4},
            "current_health": 5,
            "max_health": 5,
            "skills": {"skill_hack": 2}
        }"#;
        let sheet: CharacterSheet = serde_json::from_str(json).unwrap();

        assert!(sheet.registered);
        assert_eq!(sheet.mode, PlayMode::InCharacter);
        assert_eq!(sheet.base_stats.get(Attribute::Mental), 4);
        assert_eq!(sheet.skills.level(&SkillKey::new("skill_hack")), Some(2));
        assert!(sheet.active_effects.is_empty());
    }
}
