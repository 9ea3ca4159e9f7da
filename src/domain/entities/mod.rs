//! Domain entities - Character state and the catalog entries that drive it

mod ability;
mod active_effect;
mod character;
mod effect_definition;
mod live_stats;
mod social_groups;
mod world_object;

pub use ability::{AbilityDefinition, SkillDefinition, TargetingMode};
pub use active_effect::{ActiveEffect, AppliedEffect, EffectSource};
pub use character::{BaseStats, CharacterSheet, SkillLevels};
pub use effect_definition::{EffectDefinition, EffectKind};
pub use live_stats::LiveStats;
pub use social_groups::{SocialGroups, ALLIES_GROUP, ENEMIES_GROUP};
pub use world_object::{WorldObject, WorldObjectAction};
