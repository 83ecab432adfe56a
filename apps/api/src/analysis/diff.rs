//! Skill-set diffing — which target skills are missing from the profile.

use std::collections::HashSet;

use crate::analysis::normalize::normalize;
use crate::models::skill::Skill;

/// Returns every target skill whose normalized name is not present in the
/// profile list, preserving target order and the original (non-normalized)
/// skills. Comparison is exact string equality on normalized keys — no fuzzy
/// matching. Duplicate keys within the target are kept independently.
pub fn missing_skills(profile: &[Skill], target: &[Skill]) -> Vec<Skill> {
    let known: HashSet<String> = profile.iter().map(|s| normalize(&s.name)).collect();

    target
        .iter()
        .filter(|s| !known.contains(&normalize(&s.name)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str) -> Skill {
        Skill {
            name: name.to_string(),
            confidence: 80.0,
            evidence: String::new(),
        }
    }

    #[test]
    fn test_case_insensitive_match_collapses() {
        let profile = vec![skill("Python")];
        let target = vec![skill("python"), skill("Java")];

        let missing = missing_skills(&profile, &target);
        assert_eq!(missing, vec![skill("Java")]);
    }

    #[test]
    fn test_empty_profile_returns_all_of_target_in_order() {
        let target = vec![skill("Docker"), skill("Kubernetes"), skill("Go")];
        assert_eq!(missing_skills(&[], &target), target);
    }

    #[test]
    fn test_empty_target_returns_empty() {
        let profile = vec![skill("Python")];
        assert!(missing_skills(&profile, &[]).is_empty());
    }

    #[test]
    fn test_parenthetical_variants_match() {
        let profile = vec![skill("Python (Django)")];
        let target = vec![skill("python"), skill("Rust")];

        let missing = missing_skills(&profile, &target);
        assert_eq!(missing, vec![skill("Rust")]);
    }

    #[test]
    fn test_duplicate_target_keys_survive_independently() {
        let profile = vec![skill("SQL")];
        let target = vec![skill("Docker"), skill("docker"), skill("SQL")];

        let missing = missing_skills(&profile, &target);
        assert_eq!(missing, vec![skill("Docker"), skill("docker")]);
    }

    #[test]
    fn test_original_objects_are_preserved() {
        let profile = vec![skill("SQL")];
        let target = vec![Skill {
            name: "Docker (containers)".to_string(),
            confidence: 92.5,
            evidence: "ran Docker in prod".to_string(),
        }];

        let missing = missing_skills(&profile, &target);
        assert_eq!(missing.len(), 1);
        // Name stays non-normalized, confidence and evidence untouched.
        assert_eq!(missing[0].name, "Docker (containers)");
        assert!((missing[0].confidence - 92.5).abs() < f32::EPSILON);
        assert_eq!(missing[0].evidence, "ran Docker in prod");
    }
}
