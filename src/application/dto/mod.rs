//! Data transfer objects returned by the application services

mod action_outcome;
mod requests;

pub use action_outcome::{AbilityOutcome, AffectedCharacter, EffectStateDto, ObjectActionOutcome};
pub use requests::{ClearSceneRequestDto, ObjectActionRequestDto, UseAbilityRequestDto};
