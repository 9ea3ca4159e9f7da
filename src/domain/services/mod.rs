//! Domain services - Pure rules shared by the application services

mod check_resolver;
mod effect_lifecycle;
mod live_stats;
mod skill_gate;
mod targeting;

pub use check_resolver::{
    CheckContext, CheckOutcome, CheckResolver, DiceRoller, OwnedResource, RollBreakdown,
};
pub use effect_lifecycle::{
    apply_effect, clear_scene, process_turn, refresh_live_stats, remove_effect, TurnReport,
};
pub use live_stats::calculate_live_stats;
pub use skill_gate::{
    evaluate_skill_gate, parse_skill_requirements, SkillGateResult, SkillRequirement,
};
pub use targeting::{resolve_targets, TargetingError, TargetingRequest};

#[cfg(test)]
pub(crate) use check_resolver::tests::ScriptedDice;
