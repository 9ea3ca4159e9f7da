//! World objects - interactive props with a small action state machine

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CharacterId, EffectKey, ObjectKey, UniverseKey};

/// An object placed in a universe, e.g. a terminal or a locked door
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldObject {
    pub key: ObjectKey,
    pub universe: UniverseKey,
    pub name: String,
    #[serde(default)]
    pub owner: Option<CharacterId>,
    pub state: String,
    #[serde(default)]
    pub actions: Vec<WorldObjectAction>,
}

impl WorldObject {
    pub fn new(
        key: impl Into<ObjectKey>,
        universe: impl Into<UniverseKey>,
        name: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            universe: universe.into(),
            name: name.into(),
            owner: None,
            state: state.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_owner(mut self, owner: CharacterId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_action(mut self, action: WorldObjectAction) -> Self {
        self.actions.push(action);
        self
    }

    pub fn action(&self, name: &str) -> Option<&WorldObjectAction> {
        self.actions.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Actions usable in the object's current state
    pub fn available_actions(&self) -> impl Iterator<Item = &WorldObjectAction> {
        self.actions.iter().filter(|a| a.is_available_in(&self.state))
    }
}

/// One action on a world object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldObjectAction {
    pub name: String,
    /// States in which the action is offered; empty means every state
    #[serde(default)]
    pub visible_in: Vec<String>,
    #[serde(default)]
    pub required_skills: Option<String>,
    /// Check or ownership requirement
    #[serde(default)]
    pub check: Option<EffectKey>,
    pub success_state: String,
}

impl WorldObjectAction {
    pub fn new(name: impl Into<String>, success_state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible_in: Vec::new(),
            required_skills: None,
            check: None,
            success_state: success_state.into(),
        }
    }

    pub fn visible_in(mut self, state: impl Into<String>) -> Self {
        self.visible_in.push(state.into());
        self
    }

    pub fn with_required_skills(mut self, expression: impl Into<String>) -> Self {
        self.required_skills = Some(expression.into());
        self
    }

    pub fn with_check(mut self, check: impl Into<EffectKey>) -> Self {
        self.check = Some(check.into());
        self
    }

    pub fn is_available_in(&self, state: &str) -> bool {
        self.visible_in.is_empty() || self.visible_in.iter().any(|s| s == state)
    }
}
