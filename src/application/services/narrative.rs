//! Player-facing message fragments shared by the action services

use tracing::warn;

use crate::application::ports::outbound::CatalogPort;
use crate::domain::services::{SkillRequirement, TurnReport};

/// Render unmet requirements for players, e.g. "Hacking (level 1)"
pub(crate) fn describe_missing_skills(
    catalog: &dyn CatalogPort,
    missing: &[SkillRequirement],
) -> Vec<String> {
    missing
        .iter()
        .map(|req| {
            let name = match catalog.skill(&req.skill) {
                Some(skill) => skill.name,
                None => {
                    warn!(skill = %req.skill, "Skill missing from catalog, using raw key");
                    req.skill.to_string()
                }
            };
            format!("{} (level {})", name, req.level)
        })
        .collect()
}

/// Append the roll trace, if any, in parentheses
pub(crate) fn with_roll(message: String, roll_info: Option<&str>) -> String {
    match roll_info {
        Some(roll) => format!("{} ({})", message, roll),
        None => message,
    }
}

pub(crate) fn expired_names(turn: &TurnReport) -> Vec<String> {
    turn.expired.iter().map(|e| e.name.clone()).collect()
}
