//! Value objects - Immutable objects defined by their attributes

mod attribute;
mod condition;
mod duration;
mod ids;

pub use attribute::{Attribute, StatTarget};
pub use condition::{ControlType, PlayMode};
pub use duration::{DurationTemplate, EffectLifetime};
pub use ids::*;
