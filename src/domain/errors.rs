//! Rule-level errors raised while interpreting catalog data

use crate::domain::value_objects::EffectKey;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Invalid duration '{0}', expected turns:N, scene or permanent")]
    InvalidDuration(String),

    #[error("Effect {0} is a check and cannot be applied to a character")]
    NotApplicable(EffectKey),

    #[error("Effect {0} is not a check")]
    NotACheck(EffectKey),

    #[error("Contested check {0} needs an opponent")]
    MissingOpponent(EffectKey),

    #[error("Ownership check {0} needs a recorded resource")]
    MissingResource(EffectKey),
}
