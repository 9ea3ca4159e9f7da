//! Precondition gate shared by every gated action

use crate::application::services::PreconditionFailure;
use crate::domain::entities::{CharacterSheet, LiveStats};
use crate::domain::services::calculate_live_stats;
use crate::domain::value_objects::ControlType;

/// Refuse the action if the actor cannot act at all.
///
/// Returns freshly derived live stats so callers never trust the cached copy.
pub fn ensure_can_act(
    actor: &CharacterSheet,
    blocking: &[ControlType],
) -> Result<LiveStats, PreconditionFailure> {
    if !actor.registered {
        return Err(PreconditionFailure::NotRegistered);
    }
    if !actor.is_conscious() {
        return Err(PreconditionFailure::Unconscious);
    }
    if !actor.mode.allows_actions() {
        return Err(PreconditionFailure::OutOfCharacter);
    }

    let live = calculate_live_stats(&actor.base_stats, &actor.active_effects);
    if let Some(control) = live.first_blocking(blocking) {
        return Err(PreconditionFailure::Controlled(control));
    }
    Ok(live)
}
