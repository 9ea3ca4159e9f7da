//! Skill gate - evaluates `skill,level OR skill,level` requirement expressions

use crate::domain::entities::SkillLevels;
use crate::domain::value_objects::SkillKey;

const ALTERNATIVE_SEPARATOR: &str = " OR ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRequirement {
    pub skill: SkillKey,
    pub level: u32,
}

impl SkillRequirement {
    fn parse(group: &str) -> Option<Self> {
        let mut parts = group.splitn(2, ',');
        let skill = parts.next().map(str::trim).filter(|s| !s.is_empty())?;
        // Missing or garbled levels mean level 1
        let level = parts
            .next()
            .and_then(|l| l.trim().parse::<u32>().ok())
            .unwrap_or(1);
        Some(Self {
            skill: SkillKey::new(skill),
            level,
        })
    }

    pub fn is_met_by(&self, skills: &SkillLevels) -> bool {
        skills.level(&self.skill).is_some_and(|have| have >= self.level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillGateResult {
    pub passed: bool,
    /// First alternative the character satisfies
    pub matched: Option<SkillRequirement>,
    /// Every alternative, reported only when the gate fails
    pub missing: Vec<SkillRequirement>,
}

pub fn parse_skill_requirements(expression: &str) -> Vec<SkillRequirement> {
    expression
        .split(ALTERNATIVE_SEPARATOR)
        .filter_map(SkillRequirement::parse)
        .collect()
}

/// An expression with no alternatives always passes
pub fn evaluate_skill_gate(expression: &str, skills: &SkillLevels) -> SkillGateResult {
    let alternatives = parse_skill_requirements(expression);
    if alternatives.is_empty() {
        return SkillGateResult {
            passed: true,
            matched: None,
            missing: Vec::new(),
        };
    }

    match alternatives.iter().find(|req| req.is_met_by(skills)) {
        Some(found) => SkillGateResult {
            passed: true,
            matched: Some(found.clone()),
            missing: Vec::new(),
        },
        None => SkillGateResult {
            passed: false,
            matched: None,
            missing: alternatives,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HACK_OR_ENGINEER: &str = "skill_hack,1 OR skill_engineering,1";

    #[test]
    fn test_either_alternative_passes() {
        let hacker: SkillLevels = [("skill_hack", 1)].into_iter().collect();
        let engineer: SkillLevels = [("skill_engineering", 3)].into_iter().collect();

        assert!(evaluate_skill_gate(HACK_OR_ENGINEER, &hacker).passed);
        let result = evaluate_skill_gate(HACK_OR_ENGINEER, &engineer);
        assert!(result.passed);
        assert_eq!(result.matched.unwrap().skill, SkillKey::new("skill_engineering"));
    }

    #[test]
    fn test_failure_lists_every_alternative() {
        let nobody = SkillLevels::default();
        let result = evaluate_skill_gate(HACK_OR_ENGINEER, &nobody);

        assert!(!result.passed);
        let missing: Vec<_> = result.missing.iter().map(|r| r.skill.as_str()).collect();
        assert_eq!(missing, vec!["skill_hack", "skill_engineering"]);
    }

    #[test]
    fn test_level_must_be_reached() {
        let novice: SkillLevels = [("skill_hack", 1)].into_iter().collect();
        assert!(!evaluate_skill_gate("skill_hack,2", &novice).passed);
    }

    #[test]
    fn test_level_defaults_to_one() {
        let reqs = parse_skill_requirements("skill_hack OR skill_lockpick,abc");
        assert_eq!(reqs[0].level, 1);
        assert_eq!(reqs[1].level, 1);
    }

    #[test]
    fn test_first_match_wins_for_trace_stability() {
        let both: SkillLevels = [("skill_hack", 2), ("skill_engineering", 2)]
            .into_iter()
            .collect();
        let result = evaluate_skill_gate(HACK_OR_ENGINEER, &both);
        assert_eq!(result.matched.unwrap().skill, SkillKey::new("skill_hack"));
    }

    #[test]
    fn test_empty_expression_passes() {
        assert!(evaluate_skill_gate("", &SkillLevels::default()).passed);
    }
}
