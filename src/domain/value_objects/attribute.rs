//! Base attributes and the targets effects can modify

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::RulesError;

/// One of the character's base attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Physical,
    Dexterity,
    Mental,
    Perception,
    Social,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Self::Physical,
        Self::Dexterity,
        Self::Mental,
        Self::Perception,
        Self::Social,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Physical => "Physical",
            Self::Dexterity => "Dexterity",
            Self::Mental => "Mental",
            Self::Perception => "Perception",
            Self::Social => "Social",
        }
    }

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Dexterity => "dexterity",
            Self::Mental => "mental",
            Self::Perception => "perception",
            Self::Social => "social",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Attribute {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|attr| attr.as_key() == lowered)
            .ok_or_else(|| RulesError::UnknownAttribute(s.to_string()))
    }
}

/// The stat an effect applies to: a single attribute or every attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatTarget {
    All,
    Attribute(Attribute),
}

impl StatTarget {
    pub fn covers(&self, attribute: Attribute) -> bool {
        match self {
            Self::All => true,
            Self::Attribute(target) => *target == attribute,
        }
    }
}

impl fmt::Display for StatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Attribute(attr) => f.write_str(attr.as_key()),
        }
    }
}

impl FromStr for StatTarget {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Attribute)
    }
}

impl TryFrom<String> for StatTarget {
    type Error = RulesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatTarget> for String {
    fn from(target: StatTarget) -> Self {
        target.to_string()
    }
}
