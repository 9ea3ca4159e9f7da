//! Effect lifecycle - apply, tick and purge active effects
//!
//! Every operation leaves `live_stats` recomputed from the new effect list.

use crate::domain::entities::{ActiveEffect, AppliedEffect, CharacterSheet};
use crate::domain::services::calculate_live_stats;
use crate::domain::value_objects::{EffectKey, EffectLifetime};

/// What one turn did to a character
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnReport {
    /// Effects that ran out this turn
    pub expired: Vec<ActiveEffect>,
    /// Net change in current health from damage/heal-over-time ticks
    pub health_delta: i32,
}

/// Append a freshly instantiated effect
pub fn apply_effect(sheet: &mut CharacterSheet, effect: ActiveEffect) {
    sheet.active_effects.push(effect);
    refresh_live_stats(sheet);
}

/// Advance one turn for the bearer.
///
/// Over-time effects tick first, then turn-scoped effects lose one turn and
/// are dropped at zero. Scene-scoped and permanent effects are untouched.
pub fn process_turn(sheet: &mut CharacterSheet) -> TurnReport {
    let before = sheet.current_health;
    let tick: i32 = sheet
        .active_effects
        .iter()
        .map(|effect| match effect.applied {
            AppliedEffect::DamageOverTime { amount } => amount.saturating_neg(),
            AppliedEffect::HealOverTime { amount } => amount,
            _ => 0,
        })
        .fold(0i32, i32::saturating_add);
    if tick != 0 {
        sheet.set_health(before.saturating_add(tick));
    }

    let mut expired = Vec::new();
    let mut kept = Vec::with_capacity(sheet.active_effects.len());
    for mut effect in sheet.active_effects.drain(..) {
        if let EffectLifetime::TurnScoped { remaining } = effect.lifetime {
            let remaining = remaining.saturating_sub(1);
            effect.lifetime = EffectLifetime::TurnScoped { remaining };
            if remaining == 0 {
                expired.push(effect);
                continue;
            }
        }
        kept.push(effect);
    }
    sheet.active_effects = kept;
    refresh_live_stats(sheet);

    TurnReport {
        expired,
        health_delta: sheet.current_health.saturating_sub(before),
    }
}

/// Drop every scene-scoped effect, returning what was removed
pub fn clear_scene(sheet: &mut CharacterSheet) -> Vec<ActiveEffect> {
    let (removed, kept): (Vec<_>, Vec<_>) = sheet
        .active_effects
        .drain(..)
        .partition(|effect| effect.lifetime.is_scene_scoped());
    sheet.active_effects = kept;
    refresh_live_stats(sheet);
    removed
}

/// Explicitly remove every instance of `key`, returning what was removed
pub fn remove_effect(sheet: &mut CharacterSheet, key: &EffectKey) -> Vec<ActiveEffect> {
    let (removed, kept): (Vec<_>, Vec<_>) = sheet
        .active_effects
        .drain(..)
        .partition(|effect| &effect.effect == key);
    sheet.active_effects = kept;
    refresh_live_stats(sheet);
    removed
}

pub fn refresh_live_stats(sheet: &mut CharacterSheet) {
    sheet.live_stats = calculate_live_stats(&sheet.base_stats, &sheet.active_effects);
}
