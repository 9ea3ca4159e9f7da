//! Catalog port - read-only lookup of effect, ability and skill definitions

use crate::domain::entities::{AbilityDefinition, EffectDefinition, SkillDefinition};
use crate::domain::value_objects::{AbilityKey, EffectKey, SkillKey};

/// Definitions are immutable for the lifetime of a request, so lookups are sync
pub trait CatalogPort: Send + Sync {
    fn effect(&self, key: &EffectKey) -> Option<EffectDefinition>;

    fn ability(&self, key: &AbilityKey) -> Option<AbilityDefinition>;

    fn skill(&self, key: &SkillKey) -> Option<SkillDefinition>;
}
