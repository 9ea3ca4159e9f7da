//! Object Action Service - drives the per-object action state machine
//!
//! Gates run in the same order as abilities. Ownership is a hard
//! precondition; a bad roll is a soft failure. Only a fully successful
//! action moves the object to its success state.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::application::dto::ObjectActionOutcome;
use crate::application::ports::outbound::{
    ActionEvent, ActionEventKind, CatalogPort, ClockPort, EventLogPort, WorldObjectRepositoryPort,
};
use crate::application::services::narrative::{describe_missing_skills, expired_names, with_roll};
use crate::application::services::preconditions::ensure_can_act;
use crate::application::services::{ActionError, EffectService, PreconditionFailure};
use crate::domain::entities::{CharacterSheet, EffectKind, WorldObject, WorldObjectAction};
use crate::domain::services::{evaluate_skill_gate, CheckContext, CheckResolver};
use crate::domain::value_objects::{CharacterId, ControlType, EventId, ObjectKey, UniverseKey};

/// Request to perform a named action on a world object
#[derive(Debug, Clone)]
pub struct ObjectActionRequest {
    pub actor: CharacterId,
    pub object: ObjectKey,
    pub universe: UniverseKey,
    pub action: String,
}

pub struct ObjectActionService {
    effects: EffectService,
    objects: Arc<dyn WorldObjectRepositoryPort>,
    catalog: Arc<dyn CatalogPort>,
    events: Arc<dyn EventLogPort>,
    clock: Arc<dyn ClockPort>,
    checks: CheckResolver,
}

impl ObjectActionService {
    pub fn new(
        effects: EffectService,
        objects: Arc<dyn WorldObjectRepositoryPort>,
        catalog: Arc<dyn CatalogPort>,
        events: Arc<dyn EventLogPort>,
        clock: Arc<dyn ClockPort>,
        checks: CheckResolver,
    ) -> Self {
        Self {
            effects,
            objects,
            catalog,
            events,
            clock,
            checks,
        }
    }

    #[instrument(skip(self, request), fields(actor = %request.actor, object = %request.object, action = %request.action))]
    pub async fn perform_action(
        &self,
        request: ObjectActionRequest,
    ) -> Result<ObjectActionOutcome, ActionError> {
        let actor = self.effects.load(request.actor).await?;
        let object = self.load_object(&request.object, &request.universe).await?;
        let action = object.action(&request.action).cloned().ok_or_else(|| {
            ActionError::configuration(format!(
                "Object {} has no action {}",
                object.key, request.action
            ))
        })?;
        if !action.is_available_in(&object.state) {
            return Err(unavailable(&object, &action));
        }

        let actor_stats = ensure_can_act(&actor, &ControlType::DEFAULT_BLOCKING)?;
        let check_definition = action
            .check
            .as_ref()
            .map(|key| {
                self.catalog
                    .effect(key)
                    .ok_or_else(|| ActionError::configuration(format!("Unknown check {}", key)))
            })
            .transpose()?;

        if let Some(expression) = &action.required_skills {
            let gate = evaluate_skill_gate(expression, &actor.skills);
            if let Some(met) = &gate.matched {
                debug!(skill = %met.skill, level = met.level, "Skill requirement met");
            }
            if !gate.passed {
                let missing = describe_missing_skills(self.catalog.as_ref(), &gate.missing);
                let message = format!(
                    "{} cannot {} the {} without {}.",
                    actor.name,
                    action.name,
                    object.name,
                    missing.join(" OR ")
                );
                info!(missing = ?missing, "Object action blocked by skill requirement");
                return self
                    .soft_failure(&actor, &object, &action, None, missing, message)
                    .await;
            }
        }

        let mut roll_info = None;
        if let Some(definition) = &check_definition {
            let context = CheckContext::new(actor.id, &actor_stats).on_resource(object.owner);
            let outcome = self.checks.resolve(definition, &context)?;
            if !outcome.success {
                if matches!(definition.kind, EffectKind::Ownership) {
                    return Err(PreconditionFailure::NotOwner.into());
                }
                let message = with_roll(
                    format!("{} tries to {} the {} but fails.", actor.name, action.name, object.name),
                    outcome.roll_info.as_deref(),
                );
                info!(roll = ?outcome.roll_info, "Object action check failed");
                return self
                    .soft_failure(&actor, &object, &action, outcome.roll_info, Vec::new(), message)
                    .await;
            }
            roll_info = outcome.roll_info;
        }

        let object = self.transition(&object, &action).await?;
        let (_, turn) = self.effects.take_turn(actor.id).await?;
        let message = with_roll(
            format!(
                "{} performs {} on {}. The {} is now {}.",
                actor.name, action.name, object.name, object.name, object.state
            ),
            roll_info.as_deref(),
        );
        self.record(&actor, &object, &action, true, roll_info.clone(), &message)
            .await;
        info!(state = %object.state, "Object action resolved");

        Ok(ObjectActionOutcome {
            action_success: true,
            object_name: object.name,
            object_state: object.state,
            roll_info,
            skills_missing: Vec::new(),
            expired_effects: expired_names(&turn),
            message,
        })
    }

    async fn load_object(
        &self,
        key: &ObjectKey,
        universe: &UniverseKey,
    ) -> Result<WorldObject, ActionError> {
        self.objects
            .get(key, universe)
            .await?
            .ok_or_else(|| ActionError::NotFound(format!("Object {} in {}", key, universe)))
    }

    /// Move the object to the action's success state under its row lease.
    ///
    /// The object is re-read inside the lease; a concurrent transition that
    /// made the action unavailable wins.
    async fn transition(
        &self,
        object: &WorldObject,
        action: &WorldObjectAction,
    ) -> Result<WorldObject, ActionError> {
        let _lease = self.objects.lock(&object.key, &object.universe).await?;
        let mut current = self.load_object(&object.key, &object.universe).await?;
        if !action.is_available_in(&current.state) {
            return Err(unavailable(&current, action));
        }
        current.state = action.success_state.clone();
        self.objects.save(&current).await?;
        Ok(current)
    }

    async fn soft_failure(
        &self,
        actor: &CharacterSheet,
        object: &WorldObject,
        action: &WorldObjectAction,
        roll_info: Option<String>,
        skills_missing: Vec<String>,
        message: String,
    ) -> Result<ObjectActionOutcome, ActionError> {
        let (_, turn) = self.effects.take_turn(actor.id).await?;
        self.record(actor, object, action, false, roll_info.clone(), &message)
            .await;
        Ok(ObjectActionOutcome {
            action_success: false,
            object_name: object.name.clone(),
            object_state: object.state.clone(),
            roll_info,
            skills_missing,
            expired_effects: expired_names(&turn),
            message,
        })
    }

    async fn record(
        &self,
        actor: &CharacterSheet,
        object: &WorldObject,
        action: &WorldObjectAction,
        success: bool,
        roll_info: Option<String>,
        message: &str,
    ) {
        let event = ActionEvent {
            id: EventId::new(),
            actor: actor.id,
            kind: ActionEventKind::ObjectAction {
                object: object.key.clone(),
                universe: object.universe.clone(),
                action: action.name.clone(),
            },
            success,
            roll_info,
            message: message.to_string(),
            occurred_at: self.clock.now(),
        };
        if let Err(e) = self.events.append(event).await {
            error!("Failed to record object action event: {:#}", e);
        }
    }
}

fn unavailable(object: &WorldObject, action: &WorldObjectAction) -> ActionError {
    PreconditionFailure::ActionUnavailable {
        action: action.name.clone(),
        state: object.state.clone(),
        offered: object.available_actions().map(|a| a.name.clone()).collect(),
    }
    .into()
}
