//! Social groups - a character's named sets of other characters
//!
//! Read-only relation owned by group management; the engine only looks members up.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CharacterId;

pub const ALLIES_GROUP: &str = "Allies";
pub const ENEMIES_GROUP: &str = "Enemies";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SocialGroups(BTreeMap<String, BTreeSet<CharacterId>>);

impl SocialGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_member(mut self, group: impl Into<String>, member: CharacterId) -> Self {
        self.0.entry(group.into()).or_default().insert(member);
        self
    }

    /// Members of `group`; an unknown group is empty
    pub fn members(&self, group: &str) -> impl Iterator<Item = &CharacterId> {
        self.0.get(group).into_iter().flatten()
    }

    pub fn allies(&self) -> impl Iterator<Item = &CharacterId> {
        self.members(ALLIES_GROUP)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &CharacterId> {
        self.members(ENEMIES_GROUP)
    }
}
