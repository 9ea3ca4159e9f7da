//! Live stats - the derived view of a character used for checks and display
//!
//! Always recomputable from base stats plus active effects; the persisted copy
//! is a cache, never a source of truth.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Attribute, ControlType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStats {
    /// Base value plus every matching stat modifier
    pub effective: BTreeMap<Attribute, i32>,
    /// Added to dice totals at check time only
    pub roll_bonus: BTreeMap<Attribute, i32>,
    pub conditions: BTreeSet<ControlType>,
    /// Name of whoever applied the most recent charm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charmed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feared_of: Option<String>,
}

impl LiveStats {
    pub fn effective(&self, attribute: Attribute) -> i32 {
        self.effective.get(&attribute).copied().unwrap_or(0)
    }

    pub fn roll_bonus(&self, attribute: Attribute) -> i32 {
        self.roll_bonus.get(&attribute).copied().unwrap_or(0)
    }

    pub fn has(&self, control: ControlType) -> bool {
        self.conditions.contains(&control)
    }

    pub fn is_stunned(&self) -> bool {
        self.has(ControlType::Stun)
    }

    pub fn is_asleep(&self) -> bool {
        self.has(ControlType::Sleep)
    }

    pub fn is_dazed(&self) -> bool {
        self.has(ControlType::Daze)
    }

    /// First condition from `blocking` the character currently suffers
    pub fn first_blocking(&self, blocking: &[ControlType]) -> Option<ControlType> {
        blocking.iter().copied().find(|c| self.has(*c))
    }
}
