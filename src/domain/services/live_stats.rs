//! Live stats calculator - folds base stats and active effects into the effective view

use crate::domain::entities::{ActiveEffect, AppliedEffect, BaseStats, LiveStats};
use crate::domain::value_objects::{Attribute, ControlType};

/// Derive live stats from scratch.
///
/// Pure: the same inputs always give the same output and nothing is mutated.
pub fn calculate_live_stats(base: &BaseStats, effects: &[ActiveEffect]) -> LiveStats {
    let mut live = LiveStats::default();

    for attribute in Attribute::ALL {
        live.effective.insert(attribute, base.get(attribute));
        live.roll_bonus.insert(attribute, 0);
    }

    for effect in effects {
        match &effect.applied {
            AppliedEffect::StatModifier { target, modifier } => {
                for attribute in Attribute::ALL.into_iter().filter(|a| target.covers(*a)) {
                    *live.effective.entry(attribute).or_insert(0) += modifier;
                }
            }
            AppliedEffect::RollBonus { target, bonus } => {
                for attribute in Attribute::ALL.into_iter().filter(|a| target.covers(*a)) {
                    *live.roll_bonus.entry(attribute).or_insert(0) += bonus;
                }
            }
            AppliedEffect::Control { control } => {
                live.conditions.insert(*control);
                match control {
                    ControlType::Charm => live.charmed_by = Some(effect.source.applied_by.clone()),
                    ControlType::Fear => live.feared_of = Some(effect.source.applied_by.clone()),
                    _ => {}
                }
            }
            AppliedEffect::DamageOverTime { .. } | AppliedEffect::HealOverTime { .. } => {}
        }
    }

    live
}
