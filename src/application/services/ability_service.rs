//! Ability Service - orchestrates "use ability"
//!
//! Steps, terminal on the first blocking condition:
//! 1. Precondition gate (registered, conscious, in character, not controlled)
//! 2. Cooldown gate from the event log
//! 3. Skill gate (soft failure)
//! 4. Check gate (soft failure on a bad roll)
//! 5. Target resolution and effect application
//! 6. The actor's turn, win or lose
//! 7. Narrative message and audit entry

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::application::dto::{AbilityOutcome, AffectedCharacter};
use crate::application::ports::outbound::{
    ActionEvent, ActionEventKind, CatalogPort, ClockPort, EventLogPort, SocialGroupPort,
};
use crate::application::services::narrative::{describe_missing_skills, expired_names, with_roll};
use crate::application::services::preconditions::ensure_can_act;
use crate::application::services::{ActionError, EffectService, PreconditionFailure};
use crate::domain::entities::{
    AbilityDefinition, CharacterSheet, EffectDefinition, EffectKind, EffectSource, TargetingMode,
};
use crate::domain::services::{
    calculate_live_stats, evaluate_skill_gate, resolve_targets, CheckContext, CheckOutcome,
    CheckResolver, TargetingRequest, TurnReport,
};
use crate::domain::value_objects::{AbilityKey, CharacterId, EffectKey, EventId};

/// Request to activate an ability
#[derive(Debug, Clone)]
pub struct UseAbilityRequest {
    pub actor: CharacterId,
    pub ability: AbilityKey,
    pub target: Option<CharacterId>,
    /// Characters the caller considers in range
    pub nearby: Vec<CharacterId>,
}

pub struct AbilityService {
    effects: EffectService,
    catalog: Arc<dyn CatalogPort>,
    groups: Arc<dyn SocialGroupPort>,
    events: Arc<dyn EventLogPort>,
    clock: Arc<dyn ClockPort>,
    checks: CheckResolver,
}

impl AbilityService {
    pub fn new(
        effects: EffectService,
        catalog: Arc<dyn CatalogPort>,
        groups: Arc<dyn SocialGroupPort>,
        events: Arc<dyn EventLogPort>,
        clock: Arc<dyn ClockPort>,
        checks: CheckResolver,
    ) -> Self {
        Self {
            effects,
            catalog,
            groups,
            events,
            clock,
            checks,
        }
    }

    #[instrument(skip(self, request), fields(actor = %request.actor, ability = %request.ability))]
    pub async fn use_ability(
        &self,
        request: UseAbilityRequest,
    ) -> Result<AbilityOutcome, ActionError> {
        let ability = self
            .catalog
            .ability(&request.ability)
            .ok_or_else(|| ActionError::configuration(format!("Unknown ability {}", request.ability)))?;
        let actor = self.effects.load(request.actor).await?;

        if !actor.knows_ability(&ability.key) {
            return Err(PreconditionFailure::AbilityNotKnown(ability.name.clone()).into());
        }
        let actor_stats = ensure_can_act(&actor, &ability.blocking_controls())?;
        self.ensure_off_cooldown(&actor, &ability).await?;

        // Resolve every definition before anything is mutated
        let effect_definitions = ability
            .effects
            .iter()
            .map(|key| self.applicable_effect(key))
            .collect::<Result<Vec<_>, _>>()?;
        let check_definition = ability
            .check
            .as_ref()
            .map(|key| self.effect_definition(key))
            .transpose()?;

        let contested = matches!(
            check_definition.as_ref().map(|d| &d.kind),
            Some(EffectKind::ContestedCheck { .. })
        );
        let opponent = if ability.targeting == TargetingMode::SingleTarget || contested {
            let target_id = request.target.ok_or(PreconditionFailure::MissingTarget)?;
            let target = self
                .effects
                .load(target_id)
                .await
                .map_err(|err| match err {
                    ActionError::NotFound(_) => {
                        PreconditionFailure::TargetNotFound(target_id.to_string()).into()
                    }
                    other => other,
                })?;
            Some(target)
        } else {
            None
        };

        if let Some(expression) = &ability.required_skills {
            let gate = evaluate_skill_gate(expression, &actor.skills);
            if let Some(met) = &gate.matched {
                debug!(skill = %met.skill, level = met.level, "Skill requirement met");
            }
            if !gate.passed {
                let missing = describe_missing_skills(self.catalog.as_ref(), &gate.missing);
                let message = format!(
                    "{} lacks the training to use {}: {}.",
                    actor.name,
                    ability.name,
                    missing.join(" OR ")
                );
                let (_, turn) = self.effects.take_turn(actor.id).await?;
                self.record(&actor, &ability, false, None, &message).await;
                info!(missing = ?missing, "Ability blocked by skill requirement");
                return Ok(soft_failure(&ability, None, missing, turn, message));
            }
        }

        let check = match &check_definition {
            Some(definition) => {
                let opponent_stats = opponent
                    .as_ref()
                    .map(|o| calculate_live_stats(&o.base_stats, &o.active_effects));
                let mut context = CheckContext::new(actor.id, &actor_stats);
                if let Some(stats) = opponent_stats.as_ref() {
                    context = context.against(stats);
                }
                Some(self.checks.resolve(definition, &context)?)
            }
            None => None,
        };
        let roll_info = check.as_ref().and_then(|c| c.roll_info.clone());

        if let Some(CheckOutcome { success: false, .. }) = check {
            let message = with_roll(
                format!("{} tries to use {} but fails.", actor.name, ability.name),
                roll_info.as_deref(),
            );
            let (_, turn) = self.effects.take_turn(actor.id).await?;
            self.record(&actor, &ability, false, roll_info.clone(), &message)
                .await;
            info!(roll = ?roll_info, "Ability check failed");
            return Ok(soft_failure(&ability, roll_info, Vec::new(), turn, message));
        }

        let groups = self.groups.groups_for(actor.id).await?;
        let nearby: BTreeSet<CharacterId> = request.nearby.iter().copied().collect();
        let targets = resolve_targets(&TargetingRequest {
            mode: ability.targeting,
            caster: actor.id,
            explicit_target: opponent.as_ref().map(|o| o.id).or(request.target),
            groups: &groups,
            nearby: &nearby,
        })?;
        debug!(targets = targets.len(), "Resolved targets");

        let source = EffectSource::new(actor.name.clone(), self.clock.now());
        let mut affected = Vec::with_capacity(targets.len());
        for target in targets {
            if let Some(hit) = self
                .effects
                .apply_all(target, &effect_definitions, &source)
                .await?
            {
                affected.push(hit);
            }
        }

        let (_, turn) = self.effects.take_turn(actor.id).await?;
        let message = with_roll(success_message(&actor, &ability, &affected), roll_info.as_deref());
        self.record(&actor, &ability, true, roll_info.clone(), &message)
            .await;
        info!(affected = affected.len(), "Ability resolved");

        Ok(AbilityOutcome {
            activation_success: true,
            ability_name: ability.name.clone(),
            affected,
            roll_info,
            skills_missing: Vec::new(),
            expired_effects: expired_names(&turn),
            message,
        })
    }

    async fn ensure_off_cooldown(
        &self,
        actor: &CharacterSheet,
        ability: &AbilityDefinition,
    ) -> Result<(), ActionError> {
        if ability.cooldown_secs == 0 {
            return Ok(());
        }
        let Some(last) = self.events.last_success(actor.id, &ability.key).await? else {
            return Ok(());
        };

        let cooldown = i64::try_from(ability.cooldown_secs).unwrap_or(i64::MAX);
        let elapsed = (self.clock.now() - last).num_seconds();
        if elapsed < cooldown {
            return Err(PreconditionFailure::CooldownActive {
                ability: ability.name.clone(),
                remaining_secs: cooldown - elapsed,
            }
            .into());
        }
        Ok(())
    }

    fn effect_definition(&self, key: &EffectKey) -> Result<EffectDefinition, ActionError> {
        self.catalog
            .effect(key)
            .ok_or_else(|| ActionError::configuration(format!("Unknown effect {}", key)))
    }

    fn applicable_effect(&self, key: &EffectKey) -> Result<EffectDefinition, ActionError> {
        let definition = self.effect_definition(key)?;
        if definition.kind.is_check() {
            return Err(ActionError::configuration(format!(
                "Effect {} is a check and cannot be applied",
                key
            )));
        }
        Ok(definition)
    }

    /// Audit failures are logged, never surfaced to the player
    async fn record(
        &self,
        actor: &CharacterSheet,
        ability: &AbilityDefinition,
        success: bool,
        roll_info: Option<String>,
        message: &str,
    ) {
        let event = ActionEvent {
            id: EventId::new(),
            actor: actor.id,
            kind: ActionEventKind::Ability {
                ability: ability.key.clone(),
            },
            success,
            roll_info,
            message: message.to_string(),
            occurred_at: self.clock.now(),
        };
        if let Err(e) = self.events.append(event).await {
            error!("Failed to record ability event: {:#}", e);
        }
    }
}

fn soft_failure(
    ability: &AbilityDefinition,
    roll_info: Option<String>,
    skills_missing: Vec<String>,
    turn: TurnReport,
    message: String,
) -> AbilityOutcome {
    AbilityOutcome {
        activation_success: false,
        ability_name: ability.name.clone(),
        affected: Vec::new(),
        roll_info,
        skills_missing,
        expired_effects: expired_names(&turn),
        message,
    }
}

fn success_message(
    actor: &CharacterSheet,
    ability: &AbilityDefinition,
    affected: &[AffectedCharacter],
) -> String {
    if affected.is_empty() {
        return format!("{} uses {}, but no one is in range.", actor.name, ability.name);
    }
    if ability.targeting == TargetingMode::SelfOnly {
        return format!("{} uses {}.", actor.name, ability.name);
    }
    let names: Vec<&str> = affected.iter().map(|a| a.name.as_str()).collect();
    format!("{} uses {} on {}.", actor.name, ability.name, names.join(", "))
}
