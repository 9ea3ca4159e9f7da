//! Targeting resolver - expands an ability's targeting mode into affected characters

use std::collections::BTreeSet;

use crate::domain::entities::{SocialGroups, TargetingMode};
use crate::domain::value_objects::CharacterId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetingError {
    #[error("This ability needs a target")]
    MissingTarget,
}

/// Inputs to target resolution; proximity is decided by the caller
#[derive(Debug, Clone, Copy)]
pub struct TargetingRequest<'a> {
    pub mode: TargetingMode,
    pub caster: CharacterId,
    pub explicit_target: Option<CharacterId>,
    pub groups: &'a SocialGroups,
    pub nearby: &'a BTreeSet<CharacterId>,
}

/// Resolve the concrete set of characters an ability lands on.
///
/// An empty group or empty nearby set yields an empty set, not an error.
pub fn resolve_targets(
    request: &TargetingRequest<'_>,
) -> Result<BTreeSet<CharacterId>, TargetingError> {
    let affected = match request.mode {
        TargetingMode::SelfOnly => BTreeSet::from([request.caster]),
        TargetingMode::SingleTarget => {
            let target = request
                .explicit_target
                .ok_or(TargetingError::MissingTarget)?;
            BTreeSet::from([target])
        }
        TargetingMode::AllAllies => in_range(request.groups.allies(), request.nearby),
        TargetingMode::AllEnemies => in_range(request.groups.enemies(), request.nearby),
        TargetingMode::AllAlliesAndSelf => {
            let mut set = in_range(request.groups.allies(), request.nearby);
            set.insert(request.caster);
            set
        }
        TargetingMode::AllEnemiesAndSelf => {
            let mut set = in_range(request.groups.enemies(), request.nearby);
            set.insert(request.caster);
            set
        }
    };

    Ok(affected)
}

fn in_range<'a>(
    members: impl Iterator<Item = &'a CharacterId>,
    nearby: &BTreeSet<CharacterId>,
) -> BTreeSet<CharacterId> {
    members.filter(|id| nearby.contains(id)).copied().collect()
}
