//! Errors raised while resolving an action
//!
//! Gameplay failures are not here: a missing skill or a failed roll is an
//! `Ok` outcome with its success flag off.

use crate::domain::errors::RulesError;
use crate::domain::services::TargetingError;
use crate::domain::value_objects::ControlType;

/// Why a request was refused before anything was rolled or changed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreconditionFailure {
    #[error("Character has not completed registration")]
    NotRegistered,

    #[error("Character is unconscious")]
    Unconscious,

    #[error("Character is out of character")]
    OutOfCharacter,

    #[error("Character is {}", .0.condition_name())]
    Controlled(ControlType),

    #[error("Character does not know {0}")]
    AbilityNotKnown(String),

    #[error("{ability} is on cooldown for {remaining_secs} more seconds")]
    CooldownActive { ability: String, remaining_secs: i64 },

    #[error("This ability needs a target")]
    MissingTarget,

    #[error("Target {0} was not found")]
    TargetNotFound(String),

    #[error("{action} is not available while the object is {state}{}", offered_hint(.offered))]
    ActionUnavailable {
        action: String,
        state: String,
        /// Actions the object does offer in its current state
        offered: Vec<String>,
    },

    #[error("Only the owner can do that")]
    NotOwner,
}

impl PreconditionFailure {
    /// Stable machine-readable code for clients
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotRegistered => "NOT_REGISTERED",
            Self::Unconscious => "UNCONSCIOUS",
            Self::OutOfCharacter => "OUT_OF_CHARACTER",
            Self::Controlled(_) => "CONTROLLED",
            Self::AbilityNotKnown(_) => "ABILITY_NOT_KNOWN",
            Self::CooldownActive { .. } => "COOLDOWN_ACTIVE",
            Self::MissingTarget => "MISSING_TARGET",
            Self::TargetNotFound(_) => "TARGET_NOT_FOUND",
            Self::ActionUnavailable { .. } => "ACTION_UNAVAILABLE",
            Self::NotOwner => "NOT_OWNER",
        }
    }
}

fn offered_hint(offered: &[String]) -> String {
    if offered.is_empty() {
        String::new()
    } else {
        format!(" (try {})", offered.join(", "))
    }
}

impl From<TargetingError> for PreconditionFailure {
    fn from(err: TargetingError) -> Self {
        match err {
            TargetingError::MissingTarget => Self::MissingTarget,
        }
    }
}

/// Errors that can occur during action resolution
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Catalog data is missing or inconsistent
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The acting character or object record does not exist
    #[error("{0} not found")]
    NotFound(String),

    #[error(transparent)]
    Precondition(#[from] PreconditionFailure),

    #[error("Repository error: {0:#}")]
    Repository(#[from] anyhow::Error),
}

impl ActionError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn is_internal(&self) -> bool {
        !matches!(self, Self::Precondition(_))
    }
}

impl From<RulesError> for ActionError {
    fn from(err: RulesError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<TargetingError> for ActionError {
    fn from(err: TargetingError) -> Self {
        Self::Precondition(err.into())
    }
}
