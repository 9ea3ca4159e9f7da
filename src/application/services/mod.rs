//! Application services - Use case implementations
//!
//! Each service accepts its ports as trait objects and returns DTOs. Hard
//! refusals come back as [`ActionError`]; gameplay failures are ordinary
//! outcomes.

pub mod ability_service;
pub mod effect_service;
pub mod errors;
mod narrative;
pub mod object_action_service;
mod preconditions;

#[cfg(test)]
pub(crate) mod test_support;

pub use ability_service::{AbilityService, UseAbilityRequest};
pub use effect_service::EffectService;
pub use errors::{ActionError, PreconditionFailure};
pub use object_action_service::{ObjectActionRequest, ObjectActionService};
pub use preconditions::ensure_can_act;
