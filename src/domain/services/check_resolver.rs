//! Check resolver - executes a single dice or ownership check
//!
//! Dice come from an injected [`DiceRoller`] so checks stay deterministic under test.

use std::sync::Arc;

use crate::domain::entities::{EffectDefinition, EffectKind, LiveStats};
use crate::domain::errors::RulesError;
use crate::domain::value_objects::{Attribute, CharacterId};

/// Source of die rolls
pub trait DiceRoller: Send + Sync {
    /// Uniform roll in `1..=sides`
    fn roll(&self, sides: u32) -> i32;
}

/// The resource an ownership check compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedResource {
    pub owner: Option<CharacterId>,
}

/// Everything a check may need to know about the participants
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub actor_id: CharacterId,
    pub actor: &'a LiveStats,
    pub opponent: Option<&'a LiveStats>,
    pub resource: Option<OwnedResource>,
}

impl<'a> CheckContext<'a> {
    pub fn new(actor_id: CharacterId, actor: &'a LiveStats) -> Self {
        Self {
            actor_id,
            actor,
            opponent: None,
            resource: None,
        }
    }

    pub fn against(mut self, opponent: &'a LiveStats) -> Self {
        self.opponent = Some(opponent);
        self
    }

    pub fn on_resource(mut self, owner: Option<CharacterId>) -> Self {
        self.resource = Some(OwnedResource { owner });
        self
    }
}

/// One side's roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollBreakdown {
    pub die: i32,
    pub stat: Attribute,
    pub stat_value: i32,
    pub bonus: i32,
    pub total: i32,
}

impl RollBreakdown {
    fn trace(&self) -> String {
        let bonus = if self.bonus != 0 {
            format!("+Bonus({})", self.bonus)
        } else {
            String::new()
        };
        format!(
            "d20({})+{}({}){}={}",
            self.die,
            self.stat.display_name(),
            self.stat_value,
            bonus,
            self.total
        )
    }
}

/// Result of a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub success: bool,
    /// Absent for ownership-only checks
    pub roll_info: Option<String>,
    pub rolls: Vec<RollBreakdown>,
}

#[derive(Clone)]
pub struct CheckResolver {
    dice: Arc<dyn DiceRoller>,
}

impl CheckResolver {
    pub const DIE_SIDES: u32 = 20;

    pub fn new(dice: Arc<dyn DiceRoller>) -> Self {
        Self { dice }
    }

    /// Resolve `definition` for the given participants.
    ///
    /// Errors mean the catalog asked for something impossible (a non-check
    /// definition, a contested check without an opponent); they are never a
    /// gameplay failure.
    pub fn resolve(
        &self,
        definition: &EffectDefinition,
        context: &CheckContext<'_>,
    ) -> Result<CheckOutcome, RulesError> {
        match &definition.kind {
            EffectKind::Ownership => {
                let resource = context
                    .resource
                    .ok_or_else(|| RulesError::MissingResource(definition.key.clone()))?;
                Ok(CheckOutcome {
                    success: resource.owner == Some(context.actor_id),
                    roll_info: None,
                    rolls: Vec::new(),
                })
            }
            EffectKind::Check {
                stat,
                target_number,
            } => {
                let roll = self.roll_for(context.actor, *stat);
                Ok(CheckOutcome {
                    success: roll.total >= *target_number,
                    roll_info: Some(format!("{} vs TN {}", roll.trace(), target_number)),
                    rolls: vec![roll],
                })
            }
            EffectKind::ContestedCheck {
                stat,
                defender_stat,
            } => {
                let opponent = context
                    .opponent
                    .ok_or_else(|| RulesError::MissingOpponent(definition.key.clone()))?;
                let attack = self.roll_for(context.actor, *stat);
                let defence = self.roll_for(opponent, *defender_stat);
                // Ties go to the defender
                Ok(CheckOutcome {
                    success: attack.total > defence.total,
                    roll_info: Some(format!("{} vs {}", attack.trace(), defence.trace())),
                    rolls: vec![attack, defence],
                })
            }
            EffectKind::StatModifier { .. }
            | EffectKind::RollBonus { .. }
            | EffectKind::Control { .. }
            | EffectKind::DamageOverTime { .. }
            | EffectKind::HealOverTime { .. } => {
                Err(RulesError::NotACheck(definition.key.clone()))
            }
        }
    }

    fn roll_for(&self, stats: &LiveStats, stat: Attribute) -> RollBreakdown {
        let die = self.dice.roll(Self::DIE_SIDES);
        let stat_value = stats.effective(stat);
        let bonus = stats.roll_bonus(stat);
        RollBreakdown {
            die,
            stat,
            stat_value,
            bonus,
            total: die + stat_value + bonus,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::domain::value_objects::{ControlType, DurationTemplate, StatTarget};

    /// Dice that return a scripted sequence, then 10 forever
    pub(crate) struct ScriptedDice(Mutex<VecDeque<i32>>);

    impl ScriptedDice {
        pub(crate) fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
            Self(Mutex::new(rolls.into_iter().collect()))
        }
    }

    impl DiceRoller for ScriptedDice {
        fn roll(&self, _sides: u32) -> i32 {
            self.0.lock().unwrap().pop_front().unwrap_or(10)
        }
    }

    fn resolver(rolls: impl IntoIterator<Item = i32>) -> CheckResolver {
        CheckResolver::new(Arc::new(ScriptedDice::new(rolls)))
    }

    fn stats(stat: Attribute, value: i32, bonus: i32) -> LiveStats {
        let mut live = LiveStats::default();
        live.effective.insert(stat, value);
        live.roll_bonus.insert(stat, bonus);
        live
    }

    fn tn12() -> EffectDefinition {
        EffectDefinition::new(
            "check_hack",
            "Hacking Check",
            EffectKind::Check {
                stat: Attribute::Mental,
                target_number: 12,
            },
        )
    }

    #[test]
    fn test_stat_check_tie_succeeds() {
        let live = stats(Attribute::Mental, 5, 0);
        let ctx = CheckContext::new(CharacterId::new(), &live);

        let outcome = resolver([7]).resolve(&tn12(), &ctx).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.roll_info.as_deref(), Some("d20(7)+Mental(5)=12 vs TN 12"));
    }

    #[test]
    fn test_stat_check_one_short_fails() {
        let live = stats(Attribute::Mental, 5, 0);
        let ctx = CheckContext::new(CharacterId::new(), &live);

        let outcome = resolver([6]).resolve(&tn12(), &ctx).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.rolls[0].total, 11);
    }

    #[test]
    fn test_roll_bonus_is_added_and_traced() {
        let live = stats(Attribute::Mental, 3, 5);
        let ctx = CheckContext::new(CharacterId::new(), &live);

        let outcome = resolver([14]).resolve(&tn12(), &ctx).unwrap();
        assert!(outcome.success);
        assert_eq!(
            outcome.roll_info.as_deref(),
            Some("d20(14)+Mental(3)+Bonus(5)=22 vs TN 12")
        );
    }

    #[test]
    fn test_ownership_check_has_no_trace() {
        let owner = CharacterId::new();
        let live = LiveStats::default();
        let ownership = EffectDefinition::new("own", "Owner Only", EffectKind::Ownership);

        let ctx = CheckContext::new(owner, &live).on_resource(Some(owner));
        let outcome = resolver(Vec::<i32>::new()).resolve(&ownership, &ctx).unwrap();
        assert!(outcome.success);
        assert!(outcome.roll_info.is_none());

        let ctx = CheckContext::new(CharacterId::new(), &live).on_resource(Some(owner));
        assert!(!resolver(Vec::<i32>::new()).resolve(&ownership, &ctx).unwrap().success);

        let ctx = CheckContext::new(owner, &live).on_resource(None);
        assert!(!resolver(Vec::<i32>::new()).resolve(&ownership, &ctx).unwrap().success);
    }

    #[test]
    fn test_contested_tie_favours_defender() {
        let attacker = stats(Attribute::Physical, 3, 0);
        let defender = stats(Attribute::Physical, 2, 0);
        let grapple = EffectDefinition::new(
            "contest_grapple",
            "Grapple",
            EffectKind::ContestedCheck {
                stat: Attribute::Physical,
                defender_stat: Attribute::Physical,
            },
        );
        let ctx = CheckContext::new(CharacterId::new(), &attacker).against(&defender);

        let tie = resolver([9, 10]).resolve(&grapple, &ctx).unwrap();
        assert!(!tie.success);
        assert_eq!(
            tie.roll_info.as_deref(),
            Some("d20(9)+Physical(3)=12 vs d20(10)+Physical(2)=12")
        );

        let win = resolver([14, 9]).resolve(&grapple, &ctx).unwrap();
        assert!(win.success);
    }

    #[test]
    fn test_contested_without_opponent_is_config_error() {
        let live = LiveStats::default();
        let grapple = EffectDefinition::new(
            "contest_grapple",
            "Grapple",
            EffectKind::ContestedCheck {
                stat: Attribute::Physical,
                defender_stat: Attribute::Physical,
            },
        );
        let ctx = CheckContext::new(CharacterId::new(), &live);
        assert!(matches!(
            resolver(Vec::<i32>::new()).resolve(&grapple, &ctx),
            Err(RulesError::MissingOpponent(_))
        ));
    }

    #[test]
    fn test_applicable_effects_are_not_checks() {
        let live = LiveStats::default();
        let ctx = CheckContext::new(CharacterId::new(), &live);
        let kinds = [
            EffectKind::StatModifier {
                target: StatTarget::All,
                modifier: 1,
                duration: DurationTemplate::Scene,
            },
            EffectKind::RollBonus {
                target: StatTarget::All,
                bonus: 1,
                duration: DurationTemplate::Scene,
            },
            EffectKind::Control {
                control: ControlType::Stun,
                duration: DurationTemplate::Turns(1),
            },
            EffectKind::DamageOverTime {
                amount: 1,
                duration: DurationTemplate::Turns(2),
            },
            EffectKind::HealOverTime {
                amount: 1,
                duration: DurationTemplate::Turns(2),
            },
        ];

        for kind in kinds {
            let definition = EffectDefinition::new("applied", "Applied", kind);
            assert!(matches!(
                resolver(Vec::<i32>::new()).resolve(&definition, &ctx),
                Err(RulesError::NotACheck(_))
            ));
        }
    }
}
