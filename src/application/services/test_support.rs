//! Shared fakes for service tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::application::ports::outbound::{CatalogPort, ClockPort};
use crate::application::services::{AbilityService, EffectService, ObjectActionService};
use crate::domain::entities::{
    AbilityDefinition, EffectDefinition, EffectKind, SkillDefinition, TargetingMode,
};
use crate::domain::services::{CheckResolver, ScriptedDice};
use crate::domain::value_objects::{
    AbilityKey, Attribute, ControlType, DurationTemplate, EffectKey, SkillKey, StatTarget,
};
use crate::infrastructure::persistence::InMemoryStore;

pub(crate) struct FixedClock(Mutex<DateTime<Utc>>);

impl FixedClock {
    pub(crate) fn new() -> Self {
        Self(Mutex::new(Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap()))
    }

    pub(crate) fn advance(&self, secs: i64) {
        let mut now = self.0.lock().unwrap();
        *now = *now + Duration::seconds(secs);
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

#[derive(Default)]
pub(crate) struct MockCatalog {
    effects: RwLock<HashMap<EffectKey, EffectDefinition>>,
    abilities: RwLock<HashMap<AbilityKey, AbilityDefinition>>,
    skills: RwLock<HashMap<SkillKey, SkillDefinition>>,
}

impl MockCatalog {
    pub(crate) fn add_effect(&self, effect: EffectDefinition) {
        self.effects.write().unwrap().insert(effect.key.clone(), effect);
    }

    pub(crate) fn add_ability(&self, ability: AbilityDefinition) {
        self.abilities
            .write()
            .unwrap()
            .insert(ability.key.clone(), ability);
    }

    pub(crate) fn add_skill(&self, skill: SkillDefinition) {
        self.skills.write().unwrap().insert(skill.key.clone(), skill);
    }

    /// A small catalog covering every targeting mode and check kind
    pub(crate) fn standard() -> Self {
        let catalog = Self::default();

        catalog.add_skill(SkillDefinition::new("skill_hack", "Hacking"));
        catalog.add_skill(SkillDefinition::new("skill_athletics", "Athletics"));

        catalog.add_effect(EffectDefinition::new(
            "buff_focus",
            "Focus",
            EffectKind::StatModifier {
                target: StatTarget::Attribute(Attribute::Mental),
                modifier: 2,
                duration: DurationTemplate::Turns(3),
            },
        ));
        catalog.add_effect(EffectDefinition::new(
            "buff_rally",
            "Rally",
            EffectKind::StatModifier {
                target: StatTarget::All,
                modifier: 1,
                duration: DurationTemplate::Scene,
            },
        ));
        catalog.add_effect(EffectDefinition::new(
            "ctrl_daze",
            "Dazed",
            EffectKind::Control {
                control: ControlType::Daze,
                duration: DurationTemplate::Turns(1),
            },
        ));
        catalog.add_effect(EffectDefinition::new(
            "ctrl_root",
            "Grappled",
            EffectKind::Control {
                control: ControlType::Root,
                duration: DurationTemplate::Turns(2),
            },
        ));
        catalog.add_effect(EffectDefinition::new(
            "check_mind",
            "Mind Check",
            EffectKind::Check {
                stat: Attribute::Mental,
                target_number: 12,
            },
        ));
        catalog.add_effect(EffectDefinition::new(
            "check_bypass",
            "Bypass Check",
            EffectKind::Check {
                stat: Attribute::Dexterity,
                target_number: 12,
            },
        ));
        catalog.add_effect(EffectDefinition::new(
            "contest_grapple",
            "Grapple",
            EffectKind::ContestedCheck {
                stat: Attribute::Physical,
                defender_stat: Attribute::Physical,
            },
        ));
        catalog.add_effect(EffectDefinition::new(
            "owner_only",
            "Owner Only",
            EffectKind::Ownership,
        ));

        catalog.add_ability(
            AbilityDefinition::new("focus", "Focus", TargetingMode::SelfOnly)
                .with_effect("buff_focus"),
        );
        catalog.add_ability(
            AbilityDefinition::new("rally", "Rally", TargetingMode::AllAlliesAndSelf)
                .with_effect("buff_rally")
                .with_cooldown(60),
        );
        catalog.add_ability(
            AbilityDefinition::new("overclock", "Overclock", TargetingMode::AllEnemies)
                .with_effect("ctrl_daze"),
        );
        catalog.add_ability(
            AbilityDefinition::new("mind_spike", "Mind Spike", TargetingMode::SingleTarget)
                .with_effect("ctrl_daze")
                .with_check("check_mind"),
        );
        catalog.add_ability(
            AbilityDefinition::new("grapple", "Grapple", TargetingMode::SingleTarget)
                .with_effect("ctrl_root")
                .with_check("contest_grapple"),
        );
        catalog.add_ability(
            AbilityDefinition::new("sprint", "Sprint", TargetingMode::SelfOnly)
                .with_effect("buff_rally")
                .with_required_skills("skill_athletics,2"),
        );

        catalog
    }
}

impl CatalogPort for MockCatalog {
    fn effect(&self, key: &EffectKey) -> Option<EffectDefinition> {
        self.effects.read().unwrap().get(key).cloned()
    }

    fn ability(&self, key: &AbilityKey) -> Option<AbilityDefinition> {
        self.abilities.read().unwrap().get(key).cloned()
    }

    fn skill(&self, key: &SkillKey) -> Option<SkillDefinition> {
        self.skills.read().unwrap().get(key).cloned()
    }
}

pub(crate) struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub catalog: Arc<MockCatalog>,
    pub clock: Arc<FixedClock>,
    pub effects: EffectService,
    pub abilities: AbilityService,
    pub objects: ObjectActionService,
}

/// Services wired to an empty store, the standard catalog and scripted dice
pub(crate) fn fixture(rolls: Vec<i32>) -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let catalog = Arc::new(MockCatalog::standard());
    let clock = Arc::new(FixedClock::new());
    let checks = CheckResolver::new(Arc::new(ScriptedDice::new(rolls)));

    let effects = EffectService::new(store.clone());
    let abilities = AbilityService::new(
        effects.clone(),
        catalog.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
        checks.clone(),
    );
    let objects = ObjectActionService::new(
        effects.clone(),
        store.clone(),
        catalog.clone(),
        store.clone(),
        clock.clone(),
        checks,
    );

    Fixture {
        store,
        catalog,
        clock,
        effects,
        abilities,
        objects,
    }
}
